use crate::assembler::ContextChunk;
use crate::classifier::QuestionKind;
use docbot_llm::ChatMessage;

/// Compose the final message list for the answer completion.
///
/// The system message carries the persona, the style instruction picked by
/// the question classifier, the conversation summary, and the context
/// passages labeled with their provenance; the user message is the question
/// verbatim.
#[must_use]
pub fn build_prompt(
    context: &[ContextChunk],
    question: &str,
    history_summary: &str,
) -> Vec<ChatMessage> {
    let kind = QuestionKind::classify(question);

    let context_text = context
        .iter()
        .map(|chunk| format!("### {} – page {}\n{}", chunk.source, chunk.page, chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    let system = format!(
        "You are a friendly and precise assistant for questions about the indexed documents.\n\
         Use only the provided context and the conversation history to answer.\n\
         If the context holds relevant information, summarize it completely, correctly, and in a structured way.\n\
         {}\n\n\
         ### Conversation summary ###\n{history_summary}\n\n\
         ### Context ###\n{context_text}\n\n\
         ### Question ###\n{question}",
        kind.instruction()
    );

    vec![ChatMessage::system(system), ChatMessage::user(question)]
}
