use serde::Serialize;
use tracing::debug;

use super::fold::fold;
use super::prober::DirectoryProber;
use crate::config::QueryCatalog;
use crate::errors::VulnScopeError;

pub const RESULTS_FILE: &str = "results.sarif";

/// One confirmed analysis-result location: a run that executed a recognized
/// query and left a results file behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLocation {
    pub run_id: String,
    pub query: String,
}

impl ResultLocation {
    pub fn slug(&self) -> String {
        format!("{}-{}", self.run_id, self.query)
    }
}

/// Crawl parameters. `output_base` is the absolute URL of the analysis
/// output tree; everything that used to be an ambient global is carried
/// here explicitly.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub output_base: String,
    pub results_file: String,
    /// When false (the legacy default), a failed probe is indistinguishable
    /// from an empty directory and the crawl always completes. When true,
    /// the first probe failure aborts the crawl with an error.
    pub strict_probes: bool,
}

impl DiscoveryOptions {
    pub fn new(output_base: &str) -> Self {
        Self {
            output_base: output_base.trim_end_matches('/').to_string(),
            results_file: RESULTS_FILE.to_string(),
            strict_probes: false,
        }
    }

    pub fn strict(mut self) -> Self {
        self.strict_probes = true;
        self
    }
}

type Discovered = Result<Vec<ResultLocation>, VulnScopeError>;

/// Walks the three-level `{output}/{db}/{run_id}/{query}` hierarchy and
/// collects every `(run_id, query)` pair whose query is recognized and whose
/// directory contains the results file. Probes are issued strictly one at a
/// time through the sequential fold, so output order always matches listing
/// order (run-major, query-minor) regardless of response latency.
pub struct DiscoveryPipeline<'a, P: DirectoryProber> {
    prober: &'a P,
    catalog: &'a QueryCatalog,
    options: DiscoveryOptions,
}

impl<'a, P: DirectoryProber> DiscoveryPipeline<'a, P> {
    pub fn new(prober: &'a P, catalog: &'a QueryCatalog, options: DiscoveryOptions) -> Self {
        Self {
            prober,
            catalog,
            options,
        }
    }

    pub async fn discover(&self, db_name: &str) -> Discovered {
        let db_url = format!("{}/{}", self.options.output_base, db_name);
        let run_ids = match self.prober.child_directories(&db_url).await {
            Ok(run_ids) => run_ids,
            Err(e) => {
                if self.options.strict_probes {
                    return Err(VulnScopeError::Probe(format!("{}: {}", db_url, e)));
                }
                debug!(url = %db_url, error = %e, "Database probe failed; reporting no results");
                return Ok(Vec::new());
            }
        };

        fold(run_ids, Ok(Vec::new()), |_, run_id, acc| {
            self.visit_run(db_name, run_id, acc)
        })
        .await
    }

    async fn visit_run(&self, db_name: &str, run_id: String, acc: Discovered) -> Discovered {
        let pairs = match acc {
            Ok(pairs) => pairs,
            Err(e) => return Err(e),
        };

        let run_url = format!("{}/{}/{}", self.options.output_base, db_name, run_id);
        let queries = match self.prober.child_directories(&run_url).await {
            Ok(queries) => queries,
            Err(e) if self.options.strict_probes => {
                return Err(VulnScopeError::Probe(format!("{}: {}", run_url, e)));
            }
            Err(e) => {
                debug!(url = %run_url, error = %e, "Run probe failed; run contributes nothing");
                return Ok(pairs);
            }
        };

        fold(queries, Ok(pairs), |_, query, acc| {
            self.visit_query(db_name, &run_id, query, acc)
        })
        .await
    }

    async fn visit_query(
        &self,
        db_name: &str,
        run_id: &str,
        query: String,
        acc: Discovered,
    ) -> Discovered {
        let mut pairs = match acc {
            Ok(pairs) => pairs,
            Err(e) => return Err(e),
        };

        if !self.catalog.recognizes(&query) {
            return Ok(pairs);
        }

        let query_url = format!(
            "{}/{}/{}/{}",
            self.options.output_base, db_name, run_id, query
        );
        match self.prober.child_files(&query_url).await {
            Ok(files) => {
                if files.iter().any(|f| f == &self.options.results_file) {
                    pairs.push(ResultLocation {
                        run_id: run_id.to_string(),
                        query,
                    });
                }
                Ok(pairs)
            }
            Err(e) if self.options.strict_probes => {
                Err(VulnScopeError::Probe(format!("{}: {}", query_url, e)))
            }
            Err(e) => {
                debug!(url = %query_url, error = %e, "Query probe failed; query contributes nothing");
                Ok(pairs)
            }
        }
    }
}
