//! Prompt templates for the self-RAG nodes. Placeholders are `{name}`.

pub(super) const ANSWER_PROMPT: &str = "You are a helpful assistant who answers questions about the provided files.
<CONTEXT>
{context}
</CONTEXT>
Answer the question based on the context. If you are not sure, say \"I don't know\" or \"I don't know the answer\".
<QUESTION>
{question}
</QUESTION>
ANSWER:";

pub(super) const REWRITE_PROMPT: &str = "You are a question re-writer that converts an input question to a better version that is optimized for vectorstore retrieval. Look at the initial question and formulate an improved question.

Here is the initial question:

{question}

Improved question with no preamble:";

pub(super) const TRANSLATOR_PROMPT: &str =
    "You are a professional translator. Translate the text to {language} without giving any explanation.";

/// Reply appended when no relevant documents were found.
pub const NO_ANSWER: &str = "I don't know the answer.";
