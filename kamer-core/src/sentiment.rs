//! Optional sentiment scoring
//!
//! Scoring is an opaque capability: text in, `(polarity, subjectivity)` out.
//! A failing scorer never affects counting or retention; the extractor simply
//! leaves the sentiment fields empty.

use crate::error::{LexiconError, LexiconResult, SentimentError};
use crate::text::tokenize;
use roxmltree::Document;
use serde::Serialize;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Sentiment of one sentence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

impl Sentiment {
    /// Create a sentiment value
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
        }
    }

    /// Neutral, objective sentiment
    pub fn neutral() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Anything that can score a sentence
pub trait SentimentScorer: Send + Sync {
    /// Score the raw sentence text
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError>;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> Result<Sentiment, SentimentError> + Send + Sync,
{
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError> {
        self(text)
    }
}

/// Word-level sentiment lexicon scorer.
///
/// The sentence score is the mean polarity and mean subjectivity of the
/// tokens found in the lexicon; a sentence without known words is neutral.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment {
    words: HashMap<String, Sentiment>,
}

impl LexiconSentiment {
    /// Build from `(form, polarity, subjectivity)` triples.
    ///
    /// Forms listed more than once (one per word sense) are averaged.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: AsRef<str>,
    {
        let mut sums: HashMap<String, (f64, f64, u32)> = HashMap::new();
        for (form, polarity, subjectivity) in entries {
            let slot = sums
                .entry(form.as_ref().to_lowercase())
                .or_insert((0.0, 0.0, 0));
            slot.0 += polarity;
            slot.1 += subjectivity;
            slot.2 += 1;
        }
        let words = sums
            .into_iter()
            .map(|(form, (polarity, subjectivity, n))| {
                let n = f64::from(n);
                (form, Sentiment::new(polarity / n, subjectivity / n))
            })
            .collect();
        Self { words }
    }

    /// Parse a sentiment lexicon of the form
    /// `<sentiment><word form=".." polarity=".." subjectivity=".."/></sentiment>`
    pub fn from_xml_str(source: &str) -> LexiconResult<Self> {
        let doc = Document::parse(source)?;
        let mut entries = Vec::new();
        for word in doc
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == "word")
        {
            let form = word
                .attribute("form")
                .ok_or_else(|| LexiconError::InvalidEntry("word without form".to_string()))?;
            let number = |name: &str| -> LexiconResult<f64> {
                let raw = word.attribute(name).ok_or_else(|| {
                    LexiconError::InvalidEntry(format!("'{form}' has no {name}"))
                })?;
                raw.trim().parse::<f64>().map_err(|_| {
                    LexiconError::InvalidEntry(format!("'{form}' has non-numeric {name} '{raw}'"))
                })
            };
            entries.push((form, number("polarity")?, number("subjectivity")?));
        }
        Ok(Self::from_entries(entries))
    }

    /// Number of distinct scored forms
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no forms are scored
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SentimentScorer for LexiconSentiment {
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let hits: Vec<&Sentiment> = tokenize(text)
            .into_iter()
            .filter_map(|token| self.words.get(&token.to_lowercase()))
            .collect();
        if hits.is_empty() {
            return Ok(Sentiment::neutral());
        }
        let n = hits.len() as f64;
        Ok(Sentiment::new(
            hits.iter().map(|s| s.polarity).sum::<f64>() / n,
            hits.iter().map(|s| s.subjectivity).sum::<f64>() / n,
        ))
    }
}

/// Bounds every call of an inner scorer by a timeout.
///
/// Inner calls run on a fixed set of worker threads, so at most `workers`
/// calls are in flight at any time. A call that does not answer in time
/// fails with [`SentimentError::Timeout`]; its worker stays busy until the
/// inner call returns and its late result is discarded. Callers that cannot
/// get a free worker within the timeout fail the same way.
pub struct TimeoutScorer {
    jobs: mpsc::Sender<Job>,
    slots: Arc<Slots>,
    timeout: Duration,
}

struct Job {
    text: String,
    reply: mpsc::Sender<Result<Sentiment, SentimentError>>,
}

/// Counting semaphore over the workers
struct Slots {
    free: Mutex<usize>,
    freed: Condvar,
}

impl Slots {
    fn acquire(&self, timeout: Duration) -> bool {
        let Ok(free) = self.free.lock() else {
            return false;
        };
        match self.freed.wait_timeout_while(free, timeout, |free| *free == 0) {
            Ok((mut free, _)) if *free > 0 => {
                *free -= 1;
                true
            }
            _ => false,
        }
    }

    fn release(&self) {
        if let Ok(mut free) = self.free.lock() {
            *free += 1;
            self.freed.notify_one();
        }
    }
}

impl TimeoutScorer {
    /// Wrap `inner` with a per-call timeout and a single worker
    pub fn new(inner: Arc<dyn SentimentScorer>, timeout: Duration) -> Result<Self, SentimentError> {
        Self::with_workers(inner, timeout, 1)
    }

    /// Wrap `inner` with a per-call timeout and `workers` worker threads
    pub fn with_workers(
        inner: Arc<dyn SentimentScorer>,
        timeout: Duration,
        workers: usize,
    ) -> Result<Self, SentimentError> {
        let workers = workers.max(1);
        let (jobs, queue) = mpsc::channel::<Job>();
        let queue = Arc::new(Mutex::new(queue));
        let slots = Arc::new(Slots {
            free: Mutex::new(workers),
            freed: Condvar::new(),
        });

        for id in 0..workers {
            let inner = Arc::clone(&inner);
            let queue = Arc::clone(&queue);
            let slots = Arc::clone(&slots);
            thread::Builder::new()
                .name(format!("kamer-sentiment-{id}"))
                .spawn(move || run_worker(inner.as_ref(), &queue, &slots))
                .map_err(|e| {
                    SentimentError::Failed(format!("cannot start sentiment worker: {e}"))
                })?;
        }

        Ok(Self {
            jobs,
            slots,
            timeout,
        })
    }
}

/// Serve jobs until the owning scorer is dropped
fn run_worker(inner: &dyn SentimentScorer, queue: &Mutex<mpsc::Receiver<Job>>, slots: &Slots) {
    loop {
        let job = match queue.lock() {
            Ok(queue) => queue.recv(),
            Err(_) => return,
        };
        let Ok(job) = job else {
            return;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| inner.score(&job.text)))
            .unwrap_or_else(|_| Err(SentimentError::Failed("sentiment scorer panicked".to_string())));
        // The caller is gone once its call timed out.
        let _ = job.reply.send(result);
        slots.release();
    }
}

impl SentimentScorer for TimeoutScorer {
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let started = Instant::now();
        let timed_out = || SentimentError::Timeout(self.timeout.as_millis());

        if !self.slots.acquire(self.timeout) {
            return Err(timed_out());
        }

        let (reply, answer) = mpsc::channel();
        let job = Job {
            text: text.to_string(),
            reply,
        };
        if self.jobs.send(job).is_err() {
            self.slots.release();
            return Err(SentimentError::Failed(
                "sentiment workers have stopped".to_string(),
            ));
        }

        match answer.recv_timeout(self.timeout.saturating_sub(started.elapsed())) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(timed_out()),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(SentimentError::Failed(
                "sentiment worker terminated without a result".to_string(),
            )),
        }
    }
}
