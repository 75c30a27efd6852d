//! Channel construction helpers

use crossbeam_channel::{bounded, Receiver, Sender};

/// Create a test channel with default size
pub fn create_test_channel<T>() -> (Sender<T>, Receiver<T>) {
    bounded(16)
}
