pub mod due;
pub mod store;
pub mod todo_ops;
pub mod visible;
