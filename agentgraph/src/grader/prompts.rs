//! Prompt templates for the binary graders. Placeholders are `{name}` and filled with
//! `str::replace`.

pub(super) const DOC_GRADER_INSTRUCTIONS: &str = "You are a grader assessing relevance of a retrieved document to a user question.

If the document contains keyword(s) or semantic meaning related to the question, grade it as relevant.";

pub(super) const DOC_GRADER_PROMPT: &str = "Here is the retrieved document:

{document}

Here is the user question:

{question}

Carefully and objectively assess whether the document contains at least some information that is relevant to the question.

Return JSON with a single key, binary_score, that is 'yes' or 'no' to indicate whether the document contains at least some information that is relevant to the question.";

pub(super) const HALLUCINATION_GRADER_INSTRUCTIONS: &str = "You are grading a quiz.

You will be given FACTS and a STUDENT ANSWER.

Grade criteria:

(1) The STUDENT ANSWER is grounded in the FACTS.

(2) The STUDENT ANSWER does not contain \"hallucinated\" information outside the scope of the FACTS.

A score of yes means the answer meets all of the criteria. A score of no means it does not.

Reason step by step before concluding. Do not state the answer at the outset.";

pub(super) const HALLUCINATION_GRADER_PROMPT: &str = "FACTS:

{documents}

STUDENT ANSWER: {generation}

Return JSON with two keys: binary_score, 'yes' or 'no' to indicate whether the STUDENT ANSWER is grounded in the FACTS, and explanation, the reasoning behind the score.";

pub(super) const ANSWER_GRADER_INSTRUCTIONS: &str = "You are grading a quiz.

You will be given a QUESTION and a STUDENT ANSWER.

Grade criteria:

(1) The STUDENT ANSWER helps to answer the QUESTION.

A score of yes means the answer meets the criteria; extra information not explicitly asked for is fine. A score of no means it does not.

Reason step by step before concluding. Do not state the answer at the outset.";

pub(super) const ANSWER_GRADER_PROMPT: &str = "QUESTION:

{question}

STUDENT ANSWER: {generation}

Return JSON with two keys: binary_score, 'yes' or 'no' to indicate whether the STUDENT ANSWER meets the criteria, and explanation, the reasoning behind the score.";
