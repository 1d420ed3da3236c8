//! 基础容器
//!
//! 图存储使用的有序序列

mod linked_list;

pub use linked_list::{Iter, OrderedList};
