//! 稠密方阵
//!
//! 行优先的扁平存储，下标访问带边界检查

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::ops::{Index, IndexMut};

/// N×N 方阵
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// 用同一个值填充的方阵
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> Matrix<T> {
    /// 边长
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// 读取单元格，越界返回 None
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.offset(row, col).map(|i| &self.cells[i])
    }

    /// 可变读取单元格，越界返回 None
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.offset(row, col).map(move |i| &mut self.cells[i])
    }

    /// 第 `row` 行，越界返回 None
    pub fn row(&self, row: usize) -> Option<&[T]> {
        let start = row.checked_mul(self.size)?;
        (row < self.size).then(|| &self.cells[start..start + self.size])
    }

    /// 逐行遍历
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // size 为 0 时 chunks 会 panic
        self.cells.chunks(self.size.max(1))
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.get(row, col) {
            Some(cell) => cell,
            None => panic!(
                "matrix index ({}, {}) out of bounds for size {}",
                row, col, self.size
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let size = self.size;
        match self.get_mut(row, col) {
            Some(cell) => cell,
            None => panic!(
                "matrix index ({}, {}) out of bounds for size {}",
                row, col, size
            ),
        }
    }
}

impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
