use crate::error::Error;
use crate::model::{Block, Document, PageGeometry, Section, Stage};
use crate::surface::Surface;

use super::blocks::{block_height, render_block};
use super::flow::Cursor;
use super::paginate::{PaginationPolicy, should_break};

/// Where a block sits in the document: its section and index within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockPosition {
    pub section: Section,
    pub block: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssemblyReport {
    pub pages: usize,
    /// Blocks that started a new page.
    pub breaks: Vec<BlockPosition>,
    /// Blocks drawn past the bottom margin.
    pub overflows: Vec<BlockPosition>,
}

/// Runs the stages of a document in order, rendering each block through the
/// surface and consulting the pagination policy before every block.
pub struct Assembler {
    page: PageGeometry,
    policy: PaginationPolicy,
    cursor: Cursor,
}

impl Assembler {
    pub fn new(page: PageGeometry, policy: PaginationPolicy) -> Self {
        Self {
            page,
            policy,
            cursor: Cursor::new(page.margins.left, page.margins.top),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn assemble<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        doc: &Document,
    ) -> Result<AssemblyReport, Error> {
        let t0 = std::time::Instant::now();
        let mut report = AssemblyReport {
            pages: 1,
            ..AssemblyReport::default()
        };
        self.cursor = self.top_of_page();

        for stage in &doc.stages {
            log::debug!("stage {} at y={:.1}", stage.section, self.cursor.current_y());
            for (idx, block) in stage.blocks.iter().enumerate() {
                let position = BlockPosition {
                    section: stage.section,
                    block: idx,
                };
                let needed = space_needed(stage, idx);
                if self.policy.wants_break(
                    position,
                    self.cursor.current_y(),
                    needed,
                    &self.page,
                    self.page_is_empty(),
                ) {
                    log::debug!(
                        "page break before {} #{} ({}): y={:.1} needs {:.1}",
                        stage.section,
                        idx,
                        block.kind(),
                        self.cursor.current_y(),
                        needed,
                    );
                    surface.new_page();
                    self.cursor = self.top_of_page();
                    report.pages += 1;
                    report.breaks.push(position);
                }

                let height = block_height(block);
                if should_break(self.cursor.current_y(), height, &self.page) {
                    log::warn!(
                        "{} #{} ({}) overflows page {}: y={:.1} + {:.1} > {:.1}",
                        stage.section,
                        idx,
                        block.kind(),
                        report.pages,
                        self.cursor.current_y(),
                        height,
                        self.page.content_bottom(),
                    );
                    report.overflows.push(position);
                }

                render_block(surface, &mut self.cursor, &self.page, block)?;
            }
        }

        log::info!(
            "Layout: {} blocks on {} page(s), {} overflow(s) in {:.1}ms",
            doc.blocks().count(),
            report.pages,
            report.overflows.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(report)
    }

    fn top_of_page(&self) -> Cursor {
        Cursor::new(self.page.margins.left, self.page.margins.top)
    }

    fn page_is_empty(&self) -> bool {
        self.cursor.current_y() <= self.page.margins.top
    }
}

/// Height to reserve before drawing `stage.blocks[idx]`. A section title
/// reserves room for the block after it so it never ends a page alone.
fn space_needed(stage: &Stage, idx: usize) -> f32 {
    let height = block_height(&stage.blocks[idx]);
    match (&stage.blocks[idx], stage.blocks.get(idx + 1)) {
        (Block::SectionTitle(_), Some(next)) => height + block_height(next),
        _ => height,
    }
}
