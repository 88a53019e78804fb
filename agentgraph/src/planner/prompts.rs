//! Prompt templates for the planner stages. Placeholders are `{name}`.

pub(super) const SEARCH_PLAN_PROMPT: &str = r#"You are an expert in creating step-by-step search plans to address queries. Break the query down into simple, logical, actionable steps for a search engine.

Rules:
1. Use at most 4 steps, fewer if possible.
2. Keep steps simple, clear and concise.
3. Keep logical dependencies between steps.
4. Always end with a step that summarizes, combines or compares the results of previous steps.

Instructions:
1. Give each step an "id" (starting from 0) and a brief "step" description.
2. List in "dependencies" the ids of the prior steps it builds on.
3. The first step must have an empty dependencies array.

Example query:
"Compare Perplexity and You.com in terms of revenue, number of employees, and valuation."

Example plan (a JSON object):
{
    "steps": [
        {"id": 0, "step": "Find Perplexity's revenue, employee count, and valuation.", "dependencies": []},
        {"id": 1, "step": "Find You.com's revenue, employee count, and valuation.", "dependencies": []},
        {"id": 2, "step": "Compare the revenue, employee count, and valuation of Perplexity and You.com.", "dependencies": [0, 1]}
    ]
}

Current DateTime: {current_datetime}

Query: {user_query}
Write the plan in the language of the query (for Chinese, use Traditional Chinese [zh-tw]).
Query Plan (including a final summarize/combine/compare step):"#;

pub(super) const SEARCH_QUERY_PROMPT: &str = r#"Generate a focused list of search queries to gather information for completing the given step.

Current DateTime: {current_datetime}

Guidelines:
1. Consider the current step, the user's original query and any context from previous steps.
2. Write a short list of targeted queries that together cover the step.
3. Build on information from previous steps where it helps.
4. Give each query a time range: "day" (last 24 hours), "week", "month" or "year".

User's Original Query: {user_query}
Context from Previous Steps:
{prev_steps_context}
Current Step: {current_step}

Format the output as a JSON object:
{
    "queries": [
        {"query": "Search query 1", "time_range": "month"},
        {"query": "Search query 2", "time_range": "year"}
    ]
}

Write the queries in the language of the user's original query:"#;

pub(super) const CONCISE_CONTENT_PROMPT: &str = r#"You are an expert in summarizing content based on the user's query.

1. Keep only information relevant to the user's query.
2. Summarize it into one clear, concise paragraph.

Content: {content}
User Query: {user_query}

Your Summary:"#;

pub(super) const ANSWER_QUESTION_PROMPT: &str = r#"Provide a detailed and informative answer to the question using only the information in the web search results below. Keep an unbiased, journalistic tone.

If several entities share the same name, answer for each separately.

Guidelines:
- Do not include a reference section or URLs.
- Do not repeat the question.
- Use markdown for readability, including bullet lists.

<context>
{context}
</context>

Question: {question}
Answer in the language of the question (for Chinese, use Traditional Chinese [zh-tw]):"#;
