//! Question-answering pipeline over one resume: fuzzy search, a
//! widen-the-net keyword fallback, then an optional completion pass.
//! Completion failures never propagate; the answer degrades to verbatim
//! matched paragraphs.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::warn;

use crate::chat::search::{ParagraphIndex, SearchHit};
use crate::llm_client::{Completer, CompleterError};
use crate::models::resume::Resume;

const PRIMARY_LIMIT: usize = 10;
const KEYWORD_LIMIT: usize = 3;
/// Fallback keywords must be strictly longer than this.
const KEYWORD_MIN_LEN: usize = 3;
const ANSWER_SNIPPETS: usize = 3;
const MAX_CITED_MATCHES: usize = 5;

#[derive(Debug)]
pub struct ChatOutcome {
    pub found: bool,
    pub answer: String,
    pub matches: Vec<SearchHit>,
}

pub async fn answer_question(
    resume: &Resume,
    question: &str,
    completer: &dyn Completer,
) -> ChatOutcome {
    let index = ParagraphIndex::new(&resume.paragraphs);

    let mut matches = index.search(question, PRIMARY_LIMIT);
    if matches.is_empty() {
        matches = keyword_fallback(&index, question);
    }

    if matches.is_empty() {
        let answer = match completer.suggest(question).await {
            Ok(suggestion) => {
                format!("I couldn't find information about \"{question}\". {suggestion}")
            }
            Err(CompleterError::Unavailable) => format!(
                "I couldn't find information about \"{question}\". \
                 Try searching for specific skills or technologies."
            ),
            Err(e) => {
                warn!("completion service failed on suggestion: {e}");
                format!(
                    "I couldn't find information about \"{question}\". \
                     Try searching for specific skills or technologies mentioned in the resume."
                )
            }
        };
        return ChatOutcome {
            found: false,
            answer,
            matches: Vec::new(),
        };
    }

    let context = matches
        .iter()
        .map(|hit| hit.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let answer = match completer.answer(&context, question).await {
        Ok(text) => text,
        Err(CompleterError::Unavailable) => {
            format!("Relevant information: {}", top_snippets(&matches))
        }
        Err(e) => {
            warn!("completion service failed on answer: {e}");
            format!("Based on the resume: {}", top_snippets(&matches))
        }
    };

    matches.truncate(MAX_CITED_MATCHES);
    ChatOutcome {
        found: true,
        answer,
        matches,
    }
}

/// Zero-match fallback: search per keyword, concatenate, de-duplicate by
/// exact text equality, keep the best-scoring ten.
fn keyword_fallback(index: &ParagraphIndex, question: &str) -> Vec<SearchHit> {
    let lowered = question.to_lowercase();

    let mut collected: Vec<SearchHit> = Vec::new();
    for keyword in lowered
        .split_whitespace()
        .filter(|word| word.len() > KEYWORD_MIN_LEN)
    {
        collected.extend(index.search(keyword, KEYWORD_LIMIT));
    }

    let mut seen = HashSet::new();
    collected.retain(|hit| seen.insert(hit.text.clone()));
    collected.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    collected.truncate(PRIMARY_LIMIT);
    collected
}

fn top_snippets(matches: &[SearchHit]) -> String {
    matches
        .iter()
        .take(ANSWER_SNIPPETS)
        .map(|hit| hit.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::extract::split_paragraphs;
    use crate::llm_client::NullCompleter;
    use crate::models::resume::Paragraph;

    struct StaticCompleter {
        response: Result<&'static str, ()>,
    }

    #[async_trait]
    impl Completer for StaticCompleter {
        async fn suggest(&self, _question: &str) -> Result<String, CompleterError> {
            self.response.map(str::to_string).map_err(|_| {
                CompleterError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }
            })
        }

        async fn answer(&self, _context: &str, _question: &str) -> Result<String, CompleterError> {
            self.response.map(str::to_string).map_err(|_| {
                CompleterError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }
            })
        }
    }

    fn resume_with(texts: &[&str]) -> Resume {
        let paragraphs: Vec<Paragraph> = texts
            .iter()
            .enumerate()
            .map(|(order, text)| Paragraph {
                text: text.to_string(),
                order: order as i32,
            })
            .collect();
        Resume {
            id: Uuid::new_v4(),
            original_name: "resume.docx".to_string(),
            mime_type: crate::extract::DOCX_MIME.to_string(),
            full_text: texts.join("\n\n"),
            paragraphs,
            email: None,
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn verbatim_answer_without_completer() {
        let resume = resume_with(&[
            "Jane Doe, software engineer",
            "Proficient in Go and distributed systems",
        ]);

        let outcome = answer_question(
            &resume,
            "What languages does the candidate know?",
            &NullCompleter,
        )
        .await;

        assert!(outcome.found);
        assert!(outcome
            .answer
            .contains("Proficient in Go and distributed systems"));
        assert!(outcome.answer.starts_with("Relevant information:"));
        assert!(outcome.matches.len() <= 5);
    }

    #[tokio::test]
    async fn empty_paragraphs_never_match() {
        let resume = resume_with(&[]);

        let outcome = answer_question(&resume, "anything at all", &NullCompleter).await;

        assert!(!outcome.found);
        assert!(outcome.matches.is_empty());
        assert!(outcome.answer.contains("couldn't find information"));
    }

    #[tokio::test]
    async fn completer_answer_is_used_when_available() {
        let resume = resume_with(&["Proficient in Go and distributed systems"]);
        let completer = StaticCompleter {
            response: Ok("The candidate knows Go."),
        };

        let outcome = answer_question(&resume, "What languages?", &completer).await;

        assert!(outcome.found);
        assert_eq!(outcome.answer, "The candidate knows Go.");
    }

    #[tokio::test]
    async fn completer_failure_falls_back_to_matches() {
        let resume = resume_with(&["Proficient in Go and distributed systems"]);
        let completer = StaticCompleter { response: Err(()) };

        let outcome = answer_question(&resume, "What languages?", &completer).await;

        assert!(outcome.found);
        assert!(outcome.answer.starts_with("Based on the resume:"));
        assert!(outcome
            .answer
            .contains("Proficient in Go and distributed systems"));
    }

    #[tokio::test]
    async fn keyword_fallback_widens_the_net_and_dedupes() {
        let resume = resume_with(&["Kubernetes cluster administration"]);

        // Enough junk words that the whole question misses the threshold;
        // the per-keyword pass still finds the paragraph, once.
        let outcome = answer_question(
            &resume,
            "zzzz qqqq xxxx wwww yyyy kubernetes cluster",
            &NullCompleter,
        )
        .await;

        assert!(outcome.found);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].text, "Kubernetes cluster administration");
    }

    #[tokio::test]
    async fn no_match_suggestion_comes_from_completer() {
        let resume = resume_with(&["Kubernetes cluster administration"]);
        let completer = StaticCompleter {
            response: Ok("Try searching for container skills."),
        };

        let outcome = answer_question(&resume, "zzzz qqqq", &completer).await;

        assert!(!outcome.found);
        assert!(outcome.answer.contains("Try searching for container skills."));
        assert!(outcome.answer.contains("couldn't find information about \"zzzz qqqq\""));
    }

    #[tokio::test]
    async fn upload_shaped_paragraphs_flow_through() {
        // Paragraph splitting and the orchestrator together: the exact
        // end-to-end property for a DOCX with one skills paragraph.
        let text = "Jane Doe\njane@example.com\n\nProficient in Go and distributed systems";
        let paragraphs = split_paragraphs(text);
        let resume = Resume {
            paragraphs,
            ..resume_with(&[])
        };

        let outcome = answer_question(
            &resume,
            "What languages does the candidate know?",
            &NullCompleter,
        )
        .await;

        assert!(outcome.found);
        assert!(outcome
            .answer
            .contains("Proficient in Go and distributed systems"));
    }
}
