//! Prompt assembly for tutoring questions

/// System prompt sent with every question
pub const SYSTEM_PROMPT: &str = "Você é um tutor de Python para matemáticos. \
Responda de forma concisa, direta e útil, em Português. Se precisar de código, use blocos python. \
Se a pergunta for sobre matemática pura não relacionada a python, responda brevemente mas tente conectar com Python.";

/// A prompt ready for a completion backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// The first `max_chars` characters of `context`, always followed by `...`
pub fn truncate_context(context: &str, max_chars: usize) -> String {
    let end = context.char_indices().nth(max_chars).map_or(context.len(), |(idx, _)| idx);
    format!("{}...", &context[..end])
}

/// Build the prompt for a question about the lesson currently on screen
pub fn build_prompt(question: &str, context: &str, context_chars: usize) -> Prompt {
    let user = format!(
        "O aluno está lendo um capítulo sobre este assunto:\n\
         ---\n\
         CONTEXTO DO CAPÍTULO (Resumo):\n\
         {}\n\
         ---\n\n\
         PERGUNTA DO ALUNO: \"{}\"",
        truncate_context(context, context_chars),
        question.trim()
    );
    Prompt { system: SYSTEM_PROMPT.to_string(), user }
}
