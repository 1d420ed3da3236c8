//! 有序链表
//!
//! 基于槽位数组（arena）实现的双向链表，节点之间通过下标互相引用。
//! 顶点集合与每个顶点的邻接表都使用它保存插入顺序。

use serde::ser::{Serialize, Serializer};
use std::fmt;

/// 槽位
#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied {
        value: T,
        prev: Option<usize>,
        next: Option<usize>,
    },
    /// 空闲槽位，串成一条空闲链
    Free { next_free: Option<usize> },
}

/// 双向链表
///
/// 支持尾部追加、按相等性删除第一个匹配项、正向遍历。
/// 遍历期间链表被借用，结构性修改无法与遍历同时进行；
/// 需要边遍历边删除时，先把匹配项收集出来，再逐个删除。
#[derive(Clone)]
pub struct OrderedList<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> OrderedList<T> {
    /// 创建空链表
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
        }
    }

    /// 元素数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 分配一个槽位，优先复用空闲槽位
    fn alloc(&mut self, value: T, prev: Option<usize>) -> usize {
        let slot = Slot::Occupied {
            value,
            prev,
            next: None,
        };
        match self.free_head {
            Some(idx) => {
                if let Slot::Free { next_free } = self.slots[idx] {
                    self.free_head = next_free;
                }
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }

    fn set_next(&mut self, idx: usize, new_next: Option<usize>) {
        if let Slot::Occupied { next, .. } = &mut self.slots[idx] {
            *next = new_next;
        }
    }

    fn set_prev(&mut self, idx: usize, new_prev: Option<usize>) {
        if let Slot::Occupied { prev, .. } = &mut self.slots[idx] {
            *prev = new_prev;
        }
    }

    /// 追加到尾部
    pub fn push_back(&mut self, value: T) {
        let old_tail = self.tail;
        let idx = self.alloc(value, old_tail);
        match old_tail {
            Some(tail) => self.set_next(tail, Some(idx)),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// 从链中摘除槽位并返回其中的值
    fn unlink(&mut self, idx: usize) -> Option<T> {
        let freed = Slot::Free {
            next_free: self.free_head,
        };
        let (value, prev, next) = match std::mem::replace(&mut self.slots[idx], freed) {
            Slot::Occupied { value, prev, next } => (value, prev, next),
            other => {
                self.slots[idx] = other;
                return None;
            }
        };

        match prev {
            Some(p) => self.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.tail = prev,
        }

        self.free_head = Some(idx);
        self.len -= 1;
        Some(value)
    }

    /// 弹出尾部元素
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.unlink(tail)
    }

    /// 第一个元素
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|idx| self.value_at(idx))
    }

    /// 最后一个元素
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.value_at(idx))
    }

    fn value_at(&self, idx: usize) -> Option<&T> {
        match &self.slots[idx] {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Free { .. } => None,
        }
    }

    /// 查找第一个满足条件的槽位下标
    fn position_where<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match &self.slots[idx] {
                Slot::Occupied { value, next, .. } => {
                    if pred(value) {
                        return Some(idx);
                    }
                    cursor = *next;
                }
                Slot::Free { .. } => return None,
            }
        }
        None
    }

    /// 删除第一个满足条件的元素，O(n)
    pub fn remove_first<F>(&mut self, pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let idx = self.position_where(pred)?;
        self.unlink(idx)
    }

    /// 清空链表
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free_head = None;
        self.len = 0;
    }

    /// 正向迭代器
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }
}

impl<T: PartialEq> OrderedList<T> {
    /// 删除第一个与 `value` 相等的元素，返回被删除的值
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.remove_first(|v| v == value)
    }

    /// 是否包含
    pub fn contains(&self, value: &T) -> bool {
        self.position_where(|v| v == value).is_some()
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for OrderedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for OrderedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for OrderedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// 正向迭代器
pub struct Iter<'a, T> {
    list: &'a OrderedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        match &self.list.slots[idx] {
            Slot::Occupied { value, next, .. } => {
                self.cursor = *next;
                self.remaining -= 1;
                Some(value)
            }
            Slot::Free { .. } => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
