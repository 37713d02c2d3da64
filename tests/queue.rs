mod tests {
    use ledwire::queue::{QueueFull, TxQueue};

    #[test]
    fn test_fifo_order() {
        let queue: TxQueue<u32, 4> = TxQueue::new();
        for value in 1..=3 {
            queue.try_push(value).unwrap();
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_returns_value() {
        let queue: TxQueue<u32, 2> = TxQueue::new();
        queue.try_push(10).unwrap();
        queue.try_push(20).unwrap();
        assert!(queue.is_full());
        assert_eq!(queue.try_push(30), Err(QueueFull(30)));
        assert_eq!(queue.len(), 2);

        queue.pop();
        queue.try_push(30).unwrap();
        assert_eq!(queue.peek(|v| *v), Some(20));
    }

    #[test]
    fn test_peek_does_not_remove() {
        let queue: TxQueue<u32, 2> = TxQueue::default();
        assert_eq!(queue.peek(|v| *v), None);
        queue.try_push(7).unwrap();
        assert_eq!(queue.peek(|v| v * 2), Some(14));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear() {
        let queue: TxQueue<u32, 4> = TxQueue::new();
        queue.try_push(1).unwrap();
        queue.try_push(2).unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 4);
    }

    #[test]
    fn test_shared_reference() {
        static QUEUE: TxQueue<u8, 4> = TxQueue::new();
        QUEUE.try_push(1).unwrap();
        let retire = || QUEUE.pop();
        assert_eq!(retire(), Some(1));
    }
}
