//! Multi-step search planner.
//!
//! The model decomposes a query into at most four steps with explicit dependencies. Each step
//! gets its own search queries, built with the evidence of the steps it depends on; results
//! are optionally scraped and summarized, and the final answer lists every step's sources.
//!
//! Query-generation failures degrade a step to "no evidence" and never abort the run.

mod config;
mod multi_step;
mod prompts;
mod schema;
mod web_search;

pub use config::PlannerConfig;
pub use multi_step::{MultiStepPlanner, PlanReport};
pub use schema::{ResultData, SearchPlanStep, SearchQuery, StepResult};
pub use web_search::{build_web_search_graph, SearchNode, WebSearchState, SEARCH};
