//! fetch → parse → extract → normalize → write, once per run.

pub mod extract;
pub mod normalize;

use crate::app::ports::PageFetcher;
use crate::common::error::{Result, ScraperError};
use crate::common::types::MeetingRecord;
use crate::config::Config;
use crate::infra::csv_output::write_csv_file;
use crate::parser::Document;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument, warn};

use self::extract::{extract_meetings, ExtractError};
use self::normalize::normalize;

/// Records scraped from one page, before they are written anywhere
#[derive(Debug)]
pub struct Scrape {
    pub cards_found: usize,
    pub records: Vec<MeetingRecord>,
    /// Cards left out because a part was missing
    pub skipped: Vec<ExtractError>,
}

/// Result of a complete pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    pub cards_found: usize,
    pub records_written: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    pub output_file: PathBuf,
}

pub struct Pipeline;

impl Pipeline {
    /// Fetch the configured page and replace the output CSV with its meetings.
    #[instrument(skip_all, fields(url = %config.page_url))]
    pub fn run(config: &Config, fetcher: &dyn PageFetcher) -> Result<PipelineResult> {
        let started = Instant::now();
        info!("Starting pipeline");

        let page = fetcher.fetch(&config.page_url)?;
        info!(
            "Fetched page status={} content_type={} bytes={}",
            page.status,
            page.content_type,
            page.bytes.len()
        );
        if !page.content_type.contains("html") {
            warn!("Unexpected content type {}; parsing as HTML anyway", page.content_type);
        }
        let scrape = Self::scrape(config, &page.bytes)?;
        let output_file = write_csv_file(&config.output_path, &scrape.records)?;

        let result = PipelineResult {
            cards_found: scrape.cards_found,
            records_written: scrape.records.len(),
            skipped: scrape.skipped.len(),
            errors: scrape.skipped.iter().map(ToString::to_string).collect(),
            output_file,
        };
        info!(
            "Pipeline finished cards={} written={} skipped={} elapsed_ms={}",
            result.cards_found,
            result.records_written,
            result.skipped,
            started.elapsed().as_millis()
        );
        Ok(result)
    }

    /// Parse, extract and normalize an already-fetched page.
    ///
    /// Malformed cards are skipped with a warning, or abort the scrape with
    /// `MissingField` when `config.strict` is set.
    pub fn scrape(config: &Config, html: &[u8]) -> Result<Scrape> {
        let doc = Document::parse(html);
        let extraction = extract_meetings(&doc, &config.selectors);

        if config.strict {
            if let Some(first) = extraction.errors.first() {
                return Err(ScraperError::MissingField(first.to_string()));
            }
        }
        if extraction.cards_found == 0 {
            warn!("No meeting cards found; output will contain the header only");
        }

        let records: Vec<MeetingRecord> = extraction
            .meetings
            .into_iter()
            .map(|raw| normalize(raw, &config.host_prefix))
            .collect();

        // every card is either a record or a reported skip
        debug_assert_eq!(records.len() + extraction.errors.len(), extraction.cards_found);

        Ok(Scrape {
            cards_found: extraction.cards_found,
            records,
            skipped: extraction.errors,
        })
    }
}
