use std::iter::FusedIterator;

use thiserror::Error;
use tracing::{debug, trace};

use crate::codec;
use crate::row::Row;
use crate::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Table full.")]
    TableFull,
}

pub type TableResult<T> = Result<T, TableError>;

type Page = [u8; PAGE_SIZE];

/// Maps a row number to the page that holds it and the byte offset of its
/// slot inside that page.
pub const fn row_location(row_num: usize) -> (usize, usize) {
    let page_num = row_num / ROWS_PER_PAGE;
    let byte_offset = (row_num % ROWS_PER_PAGE) * ROW_SIZE;
    (page_num, byte_offset)
}

/// Append-only in-memory table backed by up to [`TABLE_MAX_PAGES`] pages.
///
/// Pages are allocated the first time a row inside them is written, and are
/// never shared outside the table.
pub struct Table {
    num_rows: usize,
    pages: [Option<Box<Page>>; TABLE_MAX_PAGES],
}

impl Table {
    pub fn new() -> Self {
        Self {
            num_rows: 0,
            pages: std::array::from_fn(|_| None),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= TABLE_MAX_ROWS
    }

    pub fn is_page_allocated(&self, page_num: usize) -> bool {
        self.pages.get(page_num).is_some_and(Option::is_some)
    }

    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    /// Fails with [`TableError::TableFull`], leaving the table untouched, once
    /// [`TABLE_MAX_ROWS`] rows are stored.
    pub fn append(&mut self, row: &Row) -> TableResult<()> {
        if self.is_full() {
            debug!(num_rows = self.num_rows, "append rejected, table full");
            return Err(TableError::TableFull);
        }

        let row_num = self.num_rows;
        codec::encode_into(row, self.row_slot(row_num));
        self.num_rows += 1;
        trace!(row_num, id = row.id(), "row appended");
        Ok(())
    }

    /// Rows in insertion order, as stored at the time of the call.
    pub fn scan(&self) -> Rows<'_> {
        Rows {
            table: self,
            next: 0,
            end: self.num_rows,
        }
    }

    fn row_slot(&mut self, row_num: usize) -> &mut [u8] {
        let (page_num, byte_offset) = row_location(row_num);
        assert!(
            page_num < TABLE_MAX_PAGES,
            "row {row_num} maps to page {page_num}, past the last page"
        );

        let page = self.pages[page_num].get_or_insert_with(|| {
            debug!(page_num, "allocating page");
            Box::new([0u8; PAGE_SIZE])
        });
        &mut page[byte_offset..byte_offset + ROW_SIZE]
    }

    fn read_slot(&self, row_num: usize) -> &[u8] {
        assert!(
            row_num < self.num_rows,
            "row {row_num} read past num_rows {}",
            self.num_rows
        );

        let (page_num, byte_offset) = row_location(row_num);
        match self.pages[page_num].as_deref() {
            Some(page) => &page[byte_offset..byte_offset + ROW_SIZE],
            None => panic!("row {row_num} is stored but page {page_num} was never allocated"),
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Rows<'a> {
    table: &'a Table,
    next: usize,
    end: usize,
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.next >= self.end {
            return None;
        }
        let row = codec::decode(self.table.read_slot(self.next));
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}
