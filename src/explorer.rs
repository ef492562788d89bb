use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::feature::{assemble, FeatureCollection, Fields};
use crate::query::{GeometryTable, QueryKey, QueryRequest};
use crate::session::ViewState;
use crate::source::RowSource;
use crate::style::styled_collection;
use crate::viewport::{normalize_with_pad, BoundingBox};

/// Sidebar choices: which table and column to show, tag filter and row cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub table: GeometryTable,
    pub column: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub limit: usize,
}

/// Outcome of one redraw cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Redraw {
    /// Same normalized request as last cycle; keep the current layer.
    Unchanged,
    /// Fresh, styled features for the new request.
    Updated(FeatureCollection),
}

/// Drives redraw cycles against a row source, remembering only the last request.
pub struct Explorer<S> {
    source: S,
    config: Config,
    last: Option<QueryKey>,
    verbose: u8,
}

impl<S: RowSource> Explorer<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config, last: None, verbose: 0 }
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn source(&self) -> &S { &self.source }

    pub fn config(&self) -> &Config { &self.config }

    /// Forget the last request so the next redraw always queries.
    pub fn reset(&mut self) { self.last = None }

    /// The padded, rounded box the current view would query.
    pub fn bounding_box(&self, view: &ViewState) -> Result<BoundingBox> {
        let bbox = normalize_with_pad(&view.query_bounds(), self.config.round_to, self.config.pad_digits())?;
        Ok(bbox)
    }

    pub fn request(&self, view: &ViewState, selection: &Selection) -> Result<QueryRequest> {
        let bbox = self.bounding_box(view)?;
        let request = QueryRequest::new(
            selection.table,
            selection.column.clone(),
            selection.tags.clone(),
            selection.limit,
            bbox,
        )?;
        Ok(request)
    }

    /// Tag values offered for the selected column, most frequent first.
    pub fn tag_options(&self, table: GeometryTable, column: &str) -> Result<Vec<String>> {
        self.source.tag_values(table, column)
            .with_context(|| format!("[explorer] Failed to list {column} values for {table}"))
    }

    /// Run one redraw: normalize the view, skip if the request is unchanged,
    /// otherwise fetch, assemble and style.
    pub fn redraw(&mut self, view: &ViewState, selection: &Selection) -> Result<Redraw> {
        let request = self.request(view, selection)?;
        let key = request.key();
        if self.last.as_ref() == Some(&key) {
            if self.verbose > 1 { eprintln!("[explorer] request unchanged, skipping"); }
            return Ok(Redraw::Unchanged);
        }

        if self.verbose > 0 {
            eprintln!("[explorer] {} {} bbox={:?} tags={:?} limit={}",
                request.table, request.column, request.bbox.to_array(), request.tags, request.limit);
        }
        let rows = self.source.fetch(&request)
            .with_context(|| format!("[explorer] Query failed for {} {}", request.table, request.column))?;

        let fields = Fields::for_column(&request.column);
        let collection = assemble(&rows, &fields, &request.tags, &self.config.assemble_options())?;
        if self.verbose > 0 {
            eprintln!("[explorer] {} rows -> {} features", rows.len(), collection.len());
        }

        self.last = Some(key);
        Ok(Redraw::Updated(styled_collection(collection)))
    }
}
