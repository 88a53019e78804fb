//! Multi-step search: plan, per-step queries and evidence, final answer with references.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::llm::{extract_json_object, fill_template, LlmClient, ResponseFormat};
use crate::message::Message;
use crate::search::{Scraper, SearchEngine, SearchParams};

use super::config::PlannerConfig;
use super::prompts::{
    ANSWER_QUESTION_PROMPT, CONCISE_CONTENT_PROMPT, SEARCH_PLAN_PROMPT, SEARCH_QUERY_PROMPT,
};
use super::schema::{ResultData, SearchPlanStep, SearchQuery, StepResult};

#[derive(Deserialize)]
struct PlanResponse {
    steps: Vec<SearchPlanStep>,
}

#[derive(Deserialize)]
struct QueriesResponse {
    queries: Vec<SearchQuery>,
}

/// Outcome of one planner run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    pub user_query: String,
    /// Steps in execution (ascending id) order.
    pub steps: Vec<SearchPlanStep>,
    pub step_results: Vec<StepResult>,
    /// Final answer followed by a `### References:` section.
    pub answer: String,
}

/// Dependency-ordered web search agent.
///
/// Steps run in ascending `id` order as declared by the model; the order is not re-derived
/// from `dependencies`. A dependency on a step that has not run yet contributes no context.
///
/// **Interaction**: Driven by [`SearchNode`](super::SearchNode) in the web-search graph, or
/// called directly via [`MultiStepPlanner::run`].
pub struct MultiStepPlanner {
    llm: Arc<dyn LlmClient>,
    search_engine: Arc<dyn SearchEngine>,
    scraper: Option<Arc<dyn Scraper>>,
    config: PlannerConfig,
}

impl MultiStepPlanner {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search_engine: Arc<dyn SearchEngine>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            llm,
            search_engine,
            scraper: None,
            config,
        }
    }

    /// Scraper used when `config.scrape_urls` is on.
    pub fn with_scraper(mut self, scraper: Arc<dyn Scraper>) -> Self {
        self.scraper = Some(scraper);
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans, searches every step and answers `user_query`.
    ///
    /// # Errors
    ///
    /// LLM and search-engine failures propagate. Malformed model output never fails the run:
    /// a bad plan becomes a single step, bad queries leave the step without evidence.
    pub async fn run(&self, user_query: &str) -> Result<PlanReport, AgentError> {
        tracing::debug!(user_query, "Starting multi-step search");
        let steps = self.generate_plan(user_query).await?;
        tracing::debug!(steps = steps.len(), "Generated search plan");

        let mut step_results: Vec<StepResult> = Vec::with_capacity(steps.len());
        for step in &steps {
            let previous_content = previous_content(step, &step_results);
            let queries = self
                .generate_queries(user_query, &previous_content, &step.step)
                .await?;
            tracing::debug!(step = step.id, queries = queries.len(), "Generated search queries");

            let mut results = Vec::new();
            for query in &queries {
                let params = SearchParams {
                    time_range: query.time_range,
                    limit: self.config.search_result_limit,
                    locale: self.config.locale.clone(),
                    categories: self.config.categories.clone(),
                };
                for hit in self.search_engine.search(&query.query, &params).await? {
                    results.push(self.enrich(ResultData::from(hit), user_query).await?);
                }
            }

            let mut step_result = StepResult {
                id: step.id,
                step: step.step.clone(),
                results,
                summary: String::new(),
            };
            let results_text = step_result.results_text();
            step_result.summary = if self.config.concise_step_results {
                self.concise(&results_text, user_query).await?
            } else {
                results_text
            };
            step_results.push(step_result);
        }

        let all_results = step_results
            .iter()
            .map(|r| r.summary.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = fill_template(
            ANSWER_QUESTION_PROMPT,
            &[("context", all_results.as_str()), ("question", user_query)],
        );
        let answer = self.complete(prompt, ResponseFormat::Text).await?;

        Ok(PlanReport {
            user_query: user_query.to_string(),
            answer: with_references(&answer, &step_results),
            steps,
            step_results,
        })
    }

    /// Asks for a plan; sorts it by id and keeps the first `max_steps` steps.
    async fn generate_plan(&self, user_query: &str) -> Result<Vec<SearchPlanStep>, AgentError> {
        let prompt = fill_template(
            SEARCH_PLAN_PROMPT,
            &[
                ("current_datetime", current_datetime().as_str()),
                ("user_query", user_query),
            ],
        );
        let content = self.complete(prompt, ResponseFormat::Json).await?;

        let parsed = extract_json_object(&content)
            .and_then(|v| serde_json::from_value::<PlanResponse>(v).ok())
            .map(|p| p.steps)
            .filter(|steps| !steps.is_empty());
        let mut steps = match parsed {
            Some(steps) => steps,
            None => {
                tracing::warn!(response = %content, "Malformed search plan, searching the query as one step");
                vec![SearchPlanStep {
                    id: 0,
                    step: user_query.to_string(),
                    dependencies: Vec::new(),
                }]
            }
        };
        steps.sort_by_key(|s| s.id);
        if steps.len() > self.config.max_steps {
            tracing::warn!(
                steps = steps.len(),
                max = self.config.max_steps,
                "Search plan too long, truncating"
            );
            steps.truncate(self.config.max_steps);
        }
        Ok(steps)
    }

    /// Asks for the step's queries; malformed output yields none.
    async fn generate_queries(
        &self,
        user_query: &str,
        prev_steps_context: &str,
        current_step: &str,
    ) -> Result<Vec<SearchQuery>, AgentError> {
        let prompt = fill_template(
            SEARCH_QUERY_PROMPT,
            &[
                ("current_datetime", current_datetime().as_str()),
                ("user_query", user_query),
                ("prev_steps_context", prev_steps_context),
                ("current_step", current_step),
            ],
        );
        let content = self.complete(prompt, ResponseFormat::Json).await?;

        match extract_json_object(&content)
            .and_then(|v| serde_json::from_value::<QueriesResponse>(v).ok())
        {
            Some(parsed) => {
                let mut queries = parsed.queries;
                queries.truncate(self.config.max_queries_per_step);
                Ok(queries)
            }
            None => {
                tracing::error!(response = %content, "Malformed search queries, step gets no evidence");
                Ok(Vec::new())
            }
        }
    }

    /// Fills body and concise content, scraping the page when enabled. A failed scrape falls
    /// back to the search snippet.
    async fn enrich(&self, mut data: ResultData, user_query: &str) -> Result<ResultData, AgentError> {
        let scraper = self.scraper.as_ref().filter(|_| self.config.scrape_urls);
        let page = match scraper {
            Some(scraper) => match scraper.scrape(&data.url).await {
                Ok(page) => Some(page),
                Err(e) => {
                    tracing::warn!(url = %data.url, error = %e, "Scrape failed, using snippet");
                    None
                }
            },
            None => None,
        };
        match page {
            Some(page) => {
                data.concised_content = self.concise(&page.body_text, user_query).await?;
                data.html_content = page.html;
                data.body_markdown = page.body_markdown;
                data.body_text = page.body_text;
            }
            None => {
                data.body_text = data.content.clone();
                data.concised_content = data.content.clone();
            }
        }
        Ok(data)
    }

    async fn concise(&self, content: &str, user_query: &str) -> Result<String, AgentError> {
        let prompt = fill_template(
            CONCISE_CONTENT_PROMPT,
            &[("content", content), ("user_query", user_query)],
        );
        self.complete(prompt, ResponseFormat::Text).await
    }

    async fn complete(&self, prompt: String, format: ResponseFormat) -> Result<String, AgentError> {
        let response = self.llm.invoke(&[Message::user(prompt)], format).await?;
        Ok(response.content)
    }
}

/// Concatenated `results_text` of the step's dependencies that already ran.
fn previous_content(step: &SearchPlanStep, done: &[StepResult]) -> String {
    let mut content = String::new();
    for dep in &step.dependencies {
        match done.iter().find(|r| r.id == *dep) {
            Some(result) => content.push_str(&result.results_text()),
            None => tracing::warn!(
                step = step.id,
                dependency = dep,
                "Dependency has not run yet, no context from it"
            ),
        }
    }
    content
}

/// `answer`, then a references section listing every step's result links.
fn with_references(answer: &str, step_results: &[StepResult]) -> String {
    let mut out = format!("{}\n\n### References:\n", answer);
    for result in step_results {
        out.push_str(&format!("#### Step {}: {}\n", result.id, result.step));
        for data in &result.results {
            out.push_str(&format!("- {}\n", data.reference_markdown()));
        }
        out.push_str("\n\n");
    }
    out
}

fn current_datetime() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
