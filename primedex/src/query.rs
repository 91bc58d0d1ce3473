//! Interactive query console
//!
//! The console cycles through three prompts, each ended by the sentinel `-1`:
//!
//! ```text
//! AwaitQuit ──(anything else)──▶ AwaitIndexQuery ──(-1)──▶ AwaitPrimalityQuery
//!     ▲  │                          (loops)                   (loops)  │
//!     │  └──(-1)──▶ Done                                                │
//!     └────────────────────────────────(-1)─────────────────────────────┘
//! ```
//!
//! Index queries look up the prime at a 0-based position in the list;
//! primality queries look up a value's rank. Both answer over the primes
//! greater than 2.

use std::fmt;

use primedex_core::{is_sentinel, parse_query, PrimeStore, SENTINEL};
use tracing::warn;

use crate::channel::LineChannel;
use crate::error::QueryError;

pub const QUIT_PROMPT: &str = "Enter -1 to quit, or anything else to query primes:";
pub const INDEX_PROMPT: &str = "Enter an index to look up its prime (-1 to move on):";
pub const PRIMALITY_PROMPT: &str = "Enter a number to test for primality (-1 to move on):";

/// Every prompt the console issues
pub const QUERY_PROMPTS: [&str; 3] = [QUIT_PROMPT, INDEX_PROMPT, PRIMALITY_PROMPT];

/// Where the console is in its prompt cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    AwaitQuit,
    AwaitIndexQuery,
    AwaitPrimalityQuery,
    Done,
}

/// Outcome of an index query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAnswer {
    /// `prime` sits at position `index` of the list
    Prime { index: usize, prime: u64 },
    /// The list holds only `known` primes
    Insufficient { index: i64, known: usize },
}

impl fmt::Display for IndexAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexAnswer::Prime { index, prime } => {
                write!(f, "The prime at index {index} is {prime}")
            }
            IndexAnswer::Insufficient { index, known } => write!(
                f,
                "Index {index} has not been computed yet; only {known} primes are available"
            ),
        }
    }
}

/// Outcome of a primality query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimalityAnswer {
    /// `value` is in the list at position `rank`
    Ranked { value: u64, rank: u64 },
    /// `value` lies below the largest computed prime and is not in the list
    NotPrime { value: i64 },
    /// `value` lies beyond the computed range
    OutOfRange { value: i64, max_prime: Option<u64> },
}

impl fmt::Display for PrimalityAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimalityAnswer::Ranked { value, rank } => {
                write!(f, "{value} is the {rank}-th prime greater than 2")
            }
            PrimalityAnswer::NotPrime { value } => write!(f, "{value} is not prime"),
            PrimalityAnswer::OutOfRange {
                value,
                max_prime: Some(max_prime),
            } => write!(
                f,
                "{value} is beyond the computed range (largest known prime is {max_prime}) and cannot be judged"
            ),
            PrimalityAnswer::OutOfRange {
                value,
                max_prime: None,
            } => write!(
                f,
                "{value} cannot be judged: no primes greater than 2 have been computed"
            ),
        }
    }
}

/// Prime at position `index`, or how many primes are known
pub fn answer_index(store: &PrimeStore, index: i64) -> IndexAnswer {
    let prime = usize::try_from(index)
        .ok()
        .and_then(|i| store.prime_at(i).map(|prime| (i, prime)));
    match prime {
        Some((index, prime)) => IndexAnswer::Prime { index, prime },
        None => IndexAnswer::Insufficient {
            index,
            known: store.len(),
        },
    }
}

/// Rank of `value`, or whether it can be ruled out
///
/// Values below the largest computed prime that are not in the list are not
/// prime. This includes 2, which the list never holds.
pub fn answer_primality(store: &PrimeStore, value: i64) -> PrimalityAnswer {
    if let Some(rank) = u64::try_from(value).ok().and_then(|v| store.rank_of(v)) {
        return PrimalityAnswer::Ranked {
            value: value as u64,
            rank,
        };
    }
    match store.max_prime() {
        Some(max_prime) if i128::from(value) < i128::from(max_prime) => {
            PrimalityAnswer::NotPrime { value }
        }
        max_prime => PrimalityAnswer::OutOfRange { value, max_prime },
    }
}

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuerySummary {
    pub index_queries: usize,
    pub primality_queries: usize,
    pub rejected_inputs: usize,
}

/// Prompt loop answering queries against one prime store
pub struct QueryService<'a, C> {
    store: &'a PrimeStore,
    channel: C,
    state: QueryState,
    summary: QuerySummary,
}

impl<'a, C: LineChannel> QueryService<'a, C> {
    pub fn new(store: &'a PrimeStore, channel: C) -> Self {
        Self {
            store,
            channel,
            state: QueryState::AwaitQuit,
            summary: QuerySummary::default(),
        }
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    /// Issue one prompt, consume one line and answer it
    pub fn step(&mut self) -> Result<QueryState, QueryError> {
        self.state = match self.state {
            QueryState::AwaitQuit => {
                self.write(QUIT_PROMPT)?;
                if is_sentinel(&self.next_input()) {
                    QueryState::Done
                } else {
                    QueryState::AwaitIndexQuery
                }
            }
            QueryState::AwaitIndexQuery => {
                self.write(INDEX_PROMPT)?;
                let input = self.next_input();
                if is_sentinel(&input) {
                    QueryState::AwaitPrimalityQuery
                } else {
                    if let Some(index) = self.parse(&input)? {
                        self.summary.index_queries += 1;
                        let answer = answer_index(self.store, index);
                        self.write(&answer.to_string())?;
                    }
                    QueryState::AwaitIndexQuery
                }
            }
            QueryState::AwaitPrimalityQuery => {
                self.write(PRIMALITY_PROMPT)?;
                let input = self.next_input();
                if is_sentinel(&input) {
                    QueryState::AwaitQuit
                } else {
                    if let Some(value) = self.parse(&input)? {
                        self.summary.primality_queries += 1;
                        let answer = answer_primality(self.store, value);
                        self.write(&answer.to_string())?;
                    }
                    QueryState::AwaitPrimalityQuery
                }
            }
            QueryState::Done => QueryState::Done,
        };
        Ok(self.state)
    }

    /// Run until the quit prompt receives the sentinel or input ends
    pub fn run(&mut self) -> Result<QuerySummary, QueryError> {
        while self.step()? != QueryState::Done {}
        Ok(self.summary)
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Next input line; read failures and end of input count as the sentinel
    fn next_input(&mut self) -> String {
        match self.channel.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => SENTINEL.to_string(),
            Err(e) => {
                warn!(error = %e, state = ?self.state, "failed to read console input");
                SENTINEL.to_string()
            }
        }
    }

    fn parse(&mut self, input: &str) -> Result<Option<i64>, QueryError> {
        match parse_query(input) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.summary.rejected_inputs += 1;
                self.write(&format!("'{}' is not an integer, try again", input.trim()))?;
                Ok(None)
            }
        }
    }

    fn write(&mut self, line: &str) -> Result<(), QueryError> {
        self.channel.write_line(line).map_err(QueryError::Write)
    }
}
