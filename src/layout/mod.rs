//! Document-flow layout: turns content blocks into absolute drawing calls,
//! one block at a time, starting new pages where the pagination policy says.

mod assemble;
mod blocks;
mod flow;
mod paginate;

pub use assemble::{Assembler, AssemblyReport, BlockPosition};
pub use blocks::{block_height, compute_x, render_block, thick_rule_end};
pub use flow::Cursor;
pub use paginate::{BreakPoint, PaginationPolicy, should_break};
