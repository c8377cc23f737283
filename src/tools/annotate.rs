use std::fmt::{
    Display,
    Formatter,
};
use std::sync::Arc;

use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::data_structs::annotation::AnnotationTable;
use crate::data_structs::exclusion::ExclusionMap;
use crate::data_structs::transcript::{
    assemble,
    AnnotationResult,
};
use crate::error::{
    Result,
    RowAnnotationError,
};
use crate::io::query::{
    QueryInterval,
    QueryTable,
};
use crate::utils::{
    n_threads,
    THREAD_POOL,
};

pub type RowResult = std::result::Result<AnnotationResult, RowAnnotationError>;
pub type ProgressFn = Arc<dyn Fn() + Send + Sync>;

/// Read-only state shared by every annotation worker. Built once before the
/// run; cloning only bumps reference counts.
#[derive(Debug, Clone)]
pub struct AnnotationContext {
    table:      Arc<AnnotationTable>,
    exclusions: Arc<ExclusionMap>,
}

impl AnnotationContext {
    pub fn new(
        table: AnnotationTable,
        exclusions: ExclusionMap,
    ) -> Self {
        Self {
            table:      Arc::new(table),
            exclusions: Arc::new(exclusions),
        }
    }

    pub fn table(&self) -> &AnnotationTable {
        &self.table
    }

    pub fn exclusions(&self) -> &ExclusionMap {
        &self.exclusions
    }

    /// Interval Search followed by transcript assembly for a single query.
    pub fn annotate_interval(
        &self,
        interval: &QueryInterval,
    ) -> AnnotationResult {
        let hits = self
            .table
            .search(interval.chromosome, interval.start, interval.end);
        assemble(&hits, self.exclusions.get(&interval.gene))
    }
}

/// Per-run row counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total:       usize,
    /// Rows with at least one gene.
    pub annotated:   usize,
    /// Rows whose coordinates could not be parsed.
    pub unresolved:  usize,
    /// Parsed rows that matched no gene after exclusion.
    pub unannotated: usize,
}

impl RunSummary {
    pub fn from_results(results: &[RowResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Default::default()
            },
            |mut summary, result| {
                match result {
                    Ok(r) if r.is_annotated() => summary.annotated += 1,
                    Ok(_) => summary.unannotated += 1,
                    Err(_) => summary.unresolved += 1,
                }
                summary
            },
        )
    }

    /// Rows absent from the annotated output.
    pub fn dropped(&self) -> usize {
        self.unresolved + self.unannotated
    }
}

impl Display for RunSummary {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} rows: {} annotated, {} without gene, {} unresolved",
            self.total, self.annotated, self.unannotated, self.unresolved
        )
    }
}

/// Parallel annotation driver.
///
/// Every query row is annotated independently on a Rayon pool. Results are
/// collected by row index, so the output lines up with the input table no
/// matter in which order workers finish. Rows that fail to parse are
/// reported as [`RowAnnotationError`] and never abort the batch.
#[derive(Clone)]
pub struct Annotator {
    context:  AnnotationContext,
    threads:  Option<usize>,
    progress: Option<ProgressFn>,
}

impl Annotator {
    pub fn new(context: AnnotationContext) -> Self {
        Self {
            context,
            threads: None,
            progress: None,
        }
    }

    /// Worker count. `None` uses the shared pool sized by
    /// `GTFANNOT_NUM_THREADS`.
    pub fn with_threads(
        mut self,
        threads: Option<usize>,
    ) -> Self {
        self.threads = threads;
        self
    }

    /// Callback invoked once per finished row.
    pub fn with_progress(
        mut self,
        progress: ProgressFn,
    ) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn context(&self) -> &AnnotationContext {
        &self.context
    }

    fn annotate_row(
        &self,
        query: &QueryTable,
        idx: usize,
    ) -> RowResult {
        let result = query
            .interval(idx)
            .map(|interval| self.context.annotate_interval(&interval));
        if let Err(e) = &result {
            debug!("Unresolved query: {}", e);
        }
        if let Some(progress) = &self.progress {
            progress();
        }
        result
    }

    /// One result per query row, in input order.
    pub fn annotate(
        &self,
        query: &QueryTable,
    ) -> Result<Vec<RowResult>> {
        debug!(
            "Annotating on {} threads",
            self.threads.unwrap_or_else(n_threads)
        );
        let job = || {
            (0..query.len())
                .into_par_iter()
                .map(|idx| self.annotate_row(query, idx))
                .collect::<Vec<_>>()
        };

        let results = match self.threads {
            Some(n) => {
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()?
                    .install(job)
            },
            None => THREAD_POOL.install(job),
        };
        Ok(results)
    }

    /// Annotates `query` and flattens row failures into absent results.
    pub fn run(
        &self,
        query: &QueryTable,
    ) -> Result<(Vec<AnnotationResult>, RunSummary)> {
        info!(
            "Annotating {} query rows against {} records",
            query.len(),
            self.context.table().len()
        );
        let results = self.annotate(query)?;
        let summary = RunSummary::from_results(&results);

        if summary.unresolved > 0 {
            warn!(
                "{} query rows could not be resolved and were dropped",
                summary.unresolved
            );
        }
        info!("{}", summary);

        let results = results
            .into_iter()
            .map(|result| result.unwrap_or_default())
            .collect();
        Ok((results, summary))
    }
}
