//! Grouping of laid-out pages into size-capped output files.

use log::{debug, trace};

use crate::builder::{PageGeometry, PaginatorBuilder};
use crate::error::{Error, Result};
use crate::layout;
use crate::model::{Document, OutputFile, Page};
use crate::render::Renderer;

/// Lays documents out into pages and splits the pages across output files.
///
/// Every produced [`OutputFile`] holds bytes that were measured against the limit, so no
/// file ever exceeds [`Paginator::max_bytes`].  Construct instances through
/// [`PaginatorBuilder`].
#[derive(Clone, Debug)]
pub struct Paginator {
    geometry: PageGeometry,
    max_bytes: usize,
}

impl Paginator {
    pub(crate) fn new(geometry: PageGeometry, max_bytes: usize) -> Self {
        Self {
            geometry,
            max_bytes,
        }
    }

    /// Returns a builder with the default settings.
    pub fn builder() -> PaginatorBuilder {
        PaginatorBuilder::new()
    }

    /// Returns the page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Returns the size limit for a single output file, in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Splits the document into pages without rendering anything.
    pub fn layout(&self, document: &Document) -> Vec<Page> {
        layout::layout_pages(
            document,
            self.geometry.lines_per_page(),
            self.geometry.chars_per_line(),
        )
    }

    /// Lays out the document and groups its pages into output files.
    pub fn paginate<R>(&self, document: &Document, renderer: &R) -> Result<Vec<OutputFile>>
    where
        R: Renderer + ?Sized,
    {
        let pages = self.layout(document);
        debug!(
            "Laid out {} line(s) into {} page(s) of up to {} rows",
            document.line_count(),
            pages.len(),
            self.geometry.lines_per_page()
        );
        self.group_pages(pages, renderer)
    }

    /// Groups pages into files, starting a new file whenever the next page would push the
    /// current one over the size limit.
    pub fn group_pages<R>(&self, pages: Vec<Page>, renderer: &R) -> Result<Vec<OutputFile>>
    where
        R: Renderer + ?Sized,
    {
        let mut files = Vec::new();
        let mut remaining = pages;

        while !remaining.is_empty() {
            let (count, bytes) = self.largest_fitting_prefix(&remaining, renderer)?;
            let rest = remaining.split_off(count);
            let file = OutputFile::new(files.len() + 1, remaining, bytes);
            debug!(
                "Output file {} holds pages {:?} in {} bytes",
                file.index(),
                file.page_range(),
                file.size()
            );
            files.push(file);
            remaining = rest;
        }

        Ok(files)
    }

    /// Finds the longest prefix of `pages` whose rendering fits the limit.
    ///
    /// Probes 1, 2, 4, ... pages until a probe overflows, then bisects between the last fit
    /// and the first overflow.  Rendered size grows with every added page, so this matches
    /// adding pages one at a time.
    fn largest_fitting_prefix<R>(
        &self,
        pages: &[Page],
        renderer: &R,
    ) -> Result<(usize, Vec<u8>)>
    where
        R: Renderer + ?Sized,
    {
        let first = renderer.render(&pages[..1])?;
        if first.len() > self.max_bytes {
            return Err(Error::PageExceedsLimit {
                page: pages[0].number(),
                size: first.len(),
                limit: self.max_bytes,
            });
        }

        let mut fits = 1;
        let mut best = first;
        let mut overflow = None;

        while overflow.is_none() && fits < pages.len() {
            let probe = (fits * 2).min(pages.len());
            match self.try_render(&pages[..probe], renderer)? {
                Some(bytes) => {
                    fits = probe;
                    best = bytes;
                }
                None => overflow = Some(probe),
            }
        }

        if let Some(mut upper) = overflow {
            while upper - fits > 1 {
                let probe = fits + (upper - fits) / 2;
                match self.try_render(&pages[..probe], renderer)? {
                    Some(bytes) => {
                        fits = probe;
                        best = bytes;
                    }
                    None => upper = probe,
                }
            }
        }

        Ok((fits, best))
    }

    fn try_render<R>(&self, pages: &[Page], renderer: &R) -> Result<Option<Vec<u8>>>
    where
        R: Renderer + ?Sized,
    {
        let bytes = renderer.render(pages)?;
        trace!(
            "{} page(s) render to {} of {} bytes",
            pages.len(),
            bytes.len(),
            self.max_bytes
        );
        Ok((bytes.len() <= self.max_bytes).then_some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::model::{reassemble, Row};

    /// Renderer whose output size is a fixed header plus a cost per page and per character.
    struct SizedRenderer {
        header: usize,
        per_page: usize,
        calls: Cell<usize>,
    }

    impl SizedRenderer {
        fn new(header: usize, per_page: usize) -> Self {
            Self {
                header,
                per_page,
                calls: Cell::new(0),
            }
        }
    }

    impl Renderer for SizedRenderer {
        fn render(&self, pages: &[Page]) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            let chars: usize = pages
                .iter()
                .flat_map(Page::rows)
                .map(|row| row.text().len())
                .sum();
            Ok(vec![0; self.header + self.per_page * pages.len() + chars])
        }
    }

    fn paginator(max_kb: u64, lines: usize) -> Paginator {
        PaginatorBuilder::new()
            .with_max_size_kb(max_kb)
            .with_lines_per_page(lines)
            .with_chars_per_line(40)
            .build()
            .expect("valid test configuration")
    }

    fn pages_of(count: usize) -> Vec<Page> {
        (1..=count)
            .map(|number| Page::new(number, vec![Row::new(format!("page {number}"), true)]))
            .collect()
    }

    #[test]
    fn greedy_grouping_fills_files_to_the_limit() {
        // 100-byte header, 200 bytes per page, ~6 bytes of text: 4 pages fit into 1 KB.
        let renderer = SizedRenderer::new(100, 200);
        let files = paginator(1, 10).group_pages(pages_of(10), &renderer).unwrap();

        let counts: Vec<usize> = files.iter().map(|file| file.pages().len()).collect();
        assert_eq!(counts, [4, 4, 2]);
        assert_eq!(
            files.iter().map(OutputFile::index).collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert!(files.iter().all(|file| file.size() <= 1024));
        assert_eq!(files[1].page_range(), Some((5, 8)));
    }

    #[test]
    fn matches_linear_greedy_for_every_limit() {
        let pages = pages_of(37);
        let renderer = SizedRenderer::new(50, 90);

        for max_kb in 1..=4u64 {
            let paginator = paginator(max_kb, 10);
            let files = paginator.group_pages(pages.clone(), &renderer).unwrap();

            let mut expected = Vec::new();
            let mut start = 0;
            while start < pages.len() {
                let mut end = start + 1;
                while end < pages.len()
                    && renderer.render(&pages[start..=end]).unwrap().len()
                        <= paginator.max_bytes()
                {
                    end += 1;
                }
                expected.push(end - start);
                start = end;
            }

            let counts: Vec<usize> = files.iter().map(|file| file.pages().len()).collect();
            assert_eq!(counts, expected, "limit of {max_kb} KB");
            assert!(files.iter().all(|file| file.size() <= paginator.max_bytes()));
        }
    }

    #[test]
    fn renders_logarithmically_many_candidates() {
        let renderer = SizedRenderer::new(0, 1);
        let files = paginator(64, 10).group_pages(pages_of(1000), &renderer).unwrap();

        assert_eq!(files.len(), 1);
        assert!(renderer.calls.get() <= 12, "{} renders", renderer.calls.get());
    }

    #[test]
    fn oversized_single_page_is_an_error() {
        let renderer = SizedRenderer::new(2000, 0);
        let err = paginator(1, 10)
            .group_pages(pages_of(3), &renderer)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::PageExceedsLimit {
                page: 1,
                limit: 1024,
                ..
            }
        ));
    }

    #[test]
    fn empty_document_becomes_one_file_with_one_empty_page() {
        let renderer = SizedRenderer::new(10, 10);
        let files = paginator(1, 10)
            .paginate(&Document::from_text(""), &renderer)
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].pages(), [Page::empty(1)]);
    }

    #[test]
    fn pages_across_files_reassemble_the_input() {
        let text = (0..250)
            .map(|n| format!("{n:>4} the quick brown fox jumps over the lazy dog {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let renderer = SizedRenderer::new(64, 32);
        let files = paginator(1, 7)
            .paginate(&Document::from_text(&text), &renderer)
            .unwrap();

        assert!(files.len() > 1);
        let rebuilt = reassemble(files.iter().flat_map(|file| file.pages()));
        assert_eq!(rebuilt, text);
    }
}
