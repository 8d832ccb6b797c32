// src/readers/pagelocator.rs

//! Locate the [`Page`]s of a container.
//!
//! A page begins at each occurrence of the magic `1SLD` and ends where the
//! next page begins. The last page ends at the end of the container.
//! Bytes before the first magic belong to no page.

use std::fmt;

use ::memchr::memmem;
#[allow(unused_imports)]
use ::more_asserts::{debug_assert_le, debug_assert_lt};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{FileOffset, FseError};
use crate::data::pageheader::PAGE_MAGIC;

/// A half-open range `[start, end)` of a container.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Page {
    pub start: usize,
    pub end: usize,
    /// 0-based position of this page in the container.
    pub index: usize,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Page#{}[{}‥{})", self.index, self.start, self.end)
    }
}

impl Page {
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    #[inline(always)]
    pub const fn fileoffset(&self) -> FileOffset {
        self.start as FileOffset
    }

    /// The bytes of this page within `container`.
    #[inline(always)]
    pub fn slice<'a>(&self, container: &'a [u8]) -> &'a [u8] {
        &container[self.start..self.end]
    }
}

pub type Pages = Vec<Page>;

/// Partition `buffer` into pages.
///
/// Returns [`FseError::NoPagesFound`] if `buffer` holds no magic.
pub fn locate_pages(buffer: &[u8]) -> Result<Pages, FseError> {
    defn!("(buffer len {})", buffer.len());
    let starts: Vec<usize> = memmem::find_iter(buffer, &PAGE_MAGIC).collect();
    if starts.is_empty() {
        defx!("return Err(NoPagesFound)");
        return Err(FseError::NoPagesFound);
    }
    let mut pages: Pages = Pages::with_capacity(starts.len());
    for (index, start) in starts.iter().enumerate() {
        let end: usize = match starts.get(index + 1) {
            Some(next) => *next,
            None => buffer.len(),
        };
        debug_assert_lt!(*start, end, "page {} start {} not before end {}", index, start, end);
        let page = Page {
            start: *start,
            end,
            index,
        };
        defo!("{:?}", page);
        pages.push(page);
    }
    defx!("return {} pages", pages.len());

    Ok(pages)
}
