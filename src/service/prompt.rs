/// Reply the model must give when the corpus has no answer.
pub fn fallback_message(fallback_url: &str) -> String {
    format!(
        "I'm sorry, I don't have that information right now. \
         Please visit {fallback_url} for more details."
    )
}

/// Grounding prompt: persona, strict instructions, the full corpus, then
/// the user's question verbatim.
pub fn build_prompt(content: &str, question: &str, fallback_url: &str) -> String {
    let fallback = fallback_message(fallback_url);
    format!(
        "You are Nambi, the friendly chatbot assistant for Everything Uganda.\n\
         \n\
         STRICT RULES:\n\
         1. Answer ONLY using the WEBSITE CONTENT below.\n\
         2. Do not use outside knowledge and do not invent facts, prices or dates.\n\
         3. If the answer is not in the content, reply exactly with: \"{fallback}\"\n\
         4. Keep answers concise, warm and helpful.\n\
         \n\
         WEBSITE CONTENT:\n\
         {content}\n\
         \n\
         USER QUESTION:\n\
         {question}\n"
    )
}
