// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates for each conversation state.

/// Literal reply the FAQ prompt asks for when the context is insufficient.
pub const FAQ_FALLBACK: &str =
    "Sorry, I don't have information about that in my knowledge base. Could you ask something else?";

/// Constrained one-word classification prompt.
pub fn classify_prompt(query: &str) -> String {
    format!(
        "Given the user message below, reply with ONLY one word: 'greeting', 'faq', or 'summarize'.\n\
         Respond 'greeting' if it is a salutation or general chat. \
         Respond 'summarize' if they want you to summarize something. \
         Else respond 'faq'.\n\n\
         Message: {query}"
    )
}

pub fn greeting_prompt(query: &str) -> String {
    format!(
        "You are a very friendly, helpful AI assistant. \
         Respond gently and politely to the user's greeting or general query. \
         Always use a warm, welcoming tone. Here is what the user said: \n\
         User: {query}\nRespond:"
    )
}

/// Grounded question answering over retrieved context.
pub fn faq_prompt(context: &str, query: &str) -> String {
    format!(
        "You are an AI assistant helping users by answering questions from a knowledge base. \
         Use the following context to answer the user's question accurately. \
         You may rephrase for clarity or flow, but do not add information not supported by the context. \
         Use bulleted lists where appropriate and give as much detail as possible. \
         If the context lacks enough information, respond politely: '{FAQ_FALLBACK}'\n\
         Context:\n{context}\n\n\
         Question: {query}\nAnswer:"
    )
}

pub fn summarize_prompt(context: &str) -> String {
    format!("Summarize the following text in a few lines:\n{context}")
}
