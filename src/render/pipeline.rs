use rayon::prelude::*;

use crate::foundation::core::CardRaster;
use crate::foundation::error::{CardError, CardResult};
use crate::render::compositor::{CardRequest, render_card};
use crate::text::engine::{FontSet, TextLayoutEngine};

/// How a batch of cards is spread over threads.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Worker count for the parallel pool; `None` lets rayon decide.
    pub threads: Option<usize>,
}

/// Render every request, in order.
///
/// The parallel path gives each rayon worker its own [`TextLayoutEngine`];
/// results keep the order of `requests`. The first failing card fails the batch.
#[tracing::instrument(skip(requests, fonts), fields(cards = requests.len()))]
pub fn render_cards(
    requests: &[CardRequest<'_>],
    fonts: &FontSet,
    threading: &RenderThreading,
) -> CardResult<Vec<CardRaster>> {
    if !threading.parallel {
        let mut engine = TextLayoutEngine::new();
        return requests
            .iter()
            .map(|req| render_card(req, fonts, &mut engine))
            .collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    let rendered = pool.install(|| {
        requests
            .par_iter()
            .map_init(TextLayoutEngine::new, |engine, req| {
                render_card(req, fonts, engine)
            })
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> CardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardError::render(format!("failed to build rayon thread pool: {e}")))
}
