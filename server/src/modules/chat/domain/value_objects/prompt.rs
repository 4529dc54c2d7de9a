use serde::{Deserialize, Serialize};

/// 系统提示预设
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPrompt {
    /// 展示名称
    pub label: String,
    /// 提示内容，作为用户输入的前缀参与组合
    pub content: String,
}

impl SystemPrompt {
    fn new(label: &str, content: &str) -> Self {
        Self {
            label: label.to_string(),
            content: content.to_string(),
        }
    }
}

/// 内置系统提示预设列表
pub fn system_prompts() -> Vec<SystemPrompt> {
    vec![
        SystemPrompt::new(
            "Intelligent Assistant",
            "You are an Intelligent assistant who is good at explaining things in a simple way",
        ),
        SystemPrompt::new(
            "Simple Explanations to a child",
            "Explain in simple words as if explaining it to a child",
        ),
        SystemPrompt::new(
            "Resume Keywords",
            "Please provide me the keywords from the text, which I can include in my resume. \
             If it's in German, give the same german keywords",
        ),
        SystemPrompt::new(
            "Job Description Analysis",
            "From the job description, tell me what are some qualities that this company is looking for?",
        ),
        SystemPrompt::new(
            "Cover Letter Points to highlight from JD",
            "From the job description, mention some of the points to highlight in my cover letter.",
        ),
        SystemPrompt::new(
            "Programming Expert",
            "You are an expert in programming",
        ),
        SystemPrompt::new(
            "Concise Answers",
            "Answer in minimum words as possible",
        ),
        SystemPrompt::new(
            "Concise with Reasoning",
            "Answer in minimum words as possible with reasoning",
        ),
        SystemPrompt::new(
            "Grammar Check and Rephrase",
            "Check the grammar and rephrase if required. You are also allowed to improvise",
        ),
        SystemPrompt::new(
            "Helpful Assistant",
            "You are a helpful assistant",
        ),
        SystemPrompt::new(
            "Emoji Generator",
            "I will give word(s). Just return suitable emojis and nothing else.",
        ),
        SystemPrompt::new(
            "Hinglish Explanations",
            "Explain in simple words in Hinglish. Maintain a friendly tone. keep the text in english",
        ),
        SystemPrompt::new(
            "Kannada-English Mix",
            "Explain in simple words in Kannada-English. Maintain a friendly tone. keep the text in english",
        ),
        SystemPrompt::new(
            "German Language Assistant Tanya",
            "you are my German language assistant at CEFR >= B1.\n\
             Give me sentence(s) in English. I will translate it to German.\n\
             You will correct me if I am wrong",
        ),
        SystemPrompt::new(
            "German Language Assistant Vocabulary",
            "you are my German language assistant (B2-c1 level).I will give you a German word.\n\
             You will give me its pronunciation, meaning in German, English\n\
             and an example sentence in German with its English translation.\n\
             Follow this format strictly:\n\
             <word> (<pronunciation, ex: fer-wech-seln>) - <meaning in German> \n\
             <meaning in English>\n\
             Example: \n\
             <example sentence in German>\n\
             <example sentence in English> ",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_not_empty() {
        let prompts = system_prompts();
        assert!(!prompts.is_empty());
        assert!(prompts.iter().all(|p| !p.content.is_empty()));
    }

    #[test]
    fn test_full_preset_list_carried() {
        let prompts = system_prompts();
        assert_eq!(prompts.len(), 15);

        let labels: Vec<_> = prompts.iter().map(|p| p.label.as_str()).collect();
        assert!(labels.contains(&"Resume Keywords"));
        assert!(labels.contains(&"Job Description Analysis"));
        assert!(labels.contains(&"Cover Letter Points to highlight from JD"));
        assert!(labels.contains(&"Hinglish Explanations"));
        assert!(labels.contains(&"Kannada-English Mix"));
        assert!(labels.contains(&"German Language Assistant Tanya"));
        assert!(labels.contains(&"German Language Assistant Vocabulary"));
    }
}
