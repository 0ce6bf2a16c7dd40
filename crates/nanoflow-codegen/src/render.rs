//! Rendering resolved plans into dataframe calls
//!
//! Every call transforms one dataframe handle into the next: `global` runs
//! `df0 -> df1 -> ...`, and each channel scope continues from the last
//! `global` handle.

use crate::error::RenderError;
use nanoflow_graph::{ResolvedPlan, ScopePlan};
use nanoflow_producer::{ParamSource, ProducerError};
use nanoflow_quantity::{Quantity, Scope};
use rayon::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// One rendered producer call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCall {
    /// Producer name
    pub producer: String,
    /// Dataframe handle the call reads
    pub input_df: String,
    /// Dataframe handle the call defines
    pub output_df: String,
    /// Call expression
    pub code: String,
}

impl RenderedCall {
    /// C++ statement binding the call result
    #[must_use]
    pub fn statement(&self) -> String {
        format!("auto {} = {};", self.output_df, self.code)
    }
}

/// Rendered calls of one scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedScope {
    /// Scope
    pub scope: Scope,
    /// Calls in execution order
    pub calls: Vec<RenderedCall>,
    /// Columns written to the output ntuple
    pub outputs: Vec<Quantity>,
    /// Handle after the last call
    pub final_df: String,
}

impl RenderedScope {
    /// Statements joined by newlines
    #[must_use]
    pub fn code(&self) -> String {
        self.calls
            .iter()
            .map(RenderedCall::statement)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Rendered plan, `global` first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPlan {
    /// Rendered scopes
    pub scopes: Vec<RenderedScope>,
}

impl RenderedPlan {
    /// Rendered scope by name
    #[must_use]
    pub fn scope(&self, scope: &Scope) -> Option<&RenderedScope> {
        self.scopes.iter().find(|s| &s.scope == scope)
    }

    /// Total number of calls
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.scopes.iter().map(|s| s.calls.len()).sum()
    }

    /// SHA-256 over scopes, statements and outputs, hex encoded
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for scope in &self.scopes {
            hasher.update(b"scope\0");
            hasher.update(scope.scope.as_str().as_bytes());
            for call in &scope.calls {
                hasher.update(b"\0call\0");
                hasher.update(call.producer.as_bytes());
                hasher.update(b"\0");
                hasher.update(call.statement().as_bytes());
            }
            for output in &scope.outputs {
                hasher.update(b"\0output\0");
                hasher.update(output.name().as_bytes());
            }
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

/// Rendering of a [`ResolvedPlan`]
pub trait RenderPlan {
    /// Render every scope with parameters from `params`
    ///
    /// Channel scopes are rendered in parallel; the result keeps plan order.
    ///
    /// # Errors
    /// [`RenderError::Call`] for the first call that fails to render
    fn render<P>(&self, params: &P) -> Result<RenderedPlan, RenderError>
    where
        P: ParamSource + Sync;
}

impl RenderPlan for ResolvedPlan {
    fn render<P>(&self, params: &P) -> Result<RenderedPlan, RenderError>
    where
        P: ParamSource + Sync,
    {
        let mut scopes = Vec::with_capacity(self.scopes.len());
        let mut next_df = 0;
        if let Some(global) = self.global() {
            let rendered = render_scope(global, params, 0)?;
            next_df = rendered.calls.len();
            scopes.push(rendered);
        }

        let channels: Vec<&ScopePlan> = self.channels().collect();
        let rendered: Vec<RenderedScope> = channels
            .par_iter()
            .map(|plan| render_scope(plan, params, next_df))
            .collect::<Result<_, _>>()?;
        scopes.extend(rendered);

        let plan = RenderedPlan { scopes };
        tracing::info!(
            scopes = plan.scopes.len(),
            calls = plan.call_count(),
            "rendered plan"
        );
        Ok(plan)
    }
}

fn render_scope<P>(plan: &ScopePlan, params: &P, start: usize) -> Result<RenderedScope, RenderError>
where
    P: ParamSource + Sync,
{
    let wrap = |source: ProducerError| RenderError::Call {
        scope: plan.scope.clone(),
        source,
    };

    let mut calls = Vec::with_capacity(plan.producers.len());
    let mut df = start;
    for producer in &plan.producers {
        let expansions = producer.expand(&plan.scope, params).map_err(wrap)?;
        if expansions.is_empty() {
            tracing::debug!(producer = producer.name(), scope = %plan.scope, "no calls after expansion");
        }
        for expansion in &expansions {
            let input_df = format!("df{df}");
            let code = producer
                .render_call(&plan.scope, &input_df, params, expansion)
                .map_err(wrap)?;
            df += 1;
            calls.push(RenderedCall {
                producer: producer.name().to_string(),
                input_df,
                output_df: format!("df{df}"),
                code,
            });
        }
    }

    Ok(RenderedScope {
        scope: plan.scope.clone(),
        calls,
        outputs: plan.outputs.clone(),
        final_df: format!("df{df}"),
    })
}
