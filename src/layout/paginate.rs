use crate::model::{PageGeometry, Section};

use super::assemble::BlockPosition;

/// True when a block `next_height` tall starting at `cursor_y` would cross
/// the bottom margin.
pub fn should_break(cursor_y: f32, next_height: f32, page: &PageGeometry) -> bool {
    cursor_y + next_height > page.content_bottom()
}

/// A hand-placed break: start a new page before `before_block` of `section`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakPoint {
    pub section: Section,
    pub before_block: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PaginationPolicy {
    /// Break whenever the next block does not fit in the space left.
    #[default]
    RemainingSpace,
    /// Break only at one authored point, tuned for content of known size.
    /// A point that lands on an empty page is skipped.
    FixedBreak(BreakPoint),
    /// Single page; anything past the bottom margin overflows.
    Never,
}

impl PaginationPolicy {
    /// Decide whether to start a new page before the block at `position`.
    /// `page_is_empty` suppresses breaks that would only leave a blank page.
    pub fn wants_break(
        &self,
        position: BlockPosition,
        cursor_y: f32,
        next_height: f32,
        page: &PageGeometry,
        page_is_empty: bool,
    ) -> bool {
        match self {
            PaginationPolicy::RemainingSpace => {
                !page_is_empty && should_break(cursor_y, next_height, page)
            }
            PaginationPolicy::FixedBreak(point) => {
                !page_is_empty
                    && position.section == point.section
                    && position.block == point.before_block
            }
            PaginationPolicy::Never => false,
        }
    }
}
