use serde::{Deserialize, Serialize};

/// Top-level generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: String,
    pub api_base: String,
    pub system_instruction: String,
    /// Minimum spacing between two dispatches to the model endpoint
    pub min_request_spacing_ms: u64,
    pub retry: RetryPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            min_request_spacing_ms: 30_000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Bounded retry with linear backoff.
///
/// The wait before attempt `n + 1` is `base_delay_ms * n`, capped at
/// `max_delay_ms`. `max_attempts` counts every dispatch, the first included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 30_000,
            max_delay_ms: 120_000,
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based).
    pub fn delay_for(&self, failed_attempt: u32) -> u64 {
        self.base_delay_ms
            .saturating_mul(u64::from(failed_attempt))
            .min(self.max_delay_ms)
    }

    /// Whether another attempt is allowed after `failed_attempt` failures.
    pub fn allows_retry(&self, failed_attempt: u32) -> bool {
        failed_attempt < self.max_attempts
    }
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Local storage key holding the model API credential
pub const API_KEY_STORAGE_KEY: &str = "geminiApiKey";
/// Local storage key holding the serialized `GenerationConfig`
pub const CONFIG_STORAGE_KEY: &str = "sitegen:config";

pub const SYSTEM_INSTRUCTION: &str = r#"You are a web application generator. You turn a short description into a complete, working website.

Rules:
1. Use only vanilla HTML, CSS and JavaScript (ES6+). No frameworks, no libraries, no build tools, no package.json.
   The project must run by opening index.html directly.
2. The code must work without any further setup.
3. On follow-up requests, modify the project you produced in the previous turn and return it in full.

Style:
- Minimal, sharp, professional. No rounded corners (border-radius: 0), thin solid borders instead of heavy shadows.
- High-contrast monochrome base with a single bold accent colour. No gradients.
- Flexbox or Grid layouts, generous negative space, one clean sans-serif font family.
- Subtle hover transitions and a gentle fade-in on load. Inline SVG line icons when icons are needed.

Code:
- Put CSS in a flat styles/ directory and JavaScript in a flat src/ directory, e.g.
  index.html, styles/main.css, src/app.js.
- Always use ES modules: <script src="src/app.js" type="module" defer></script>.
- Define colours, fonts and spacing as CSS custom properties on :root.
- Semantic, accessible HTML5 with ARIA attributes where needed. Fully responsive.

Output:
- For any request that produces code, answer with a single valid JSON object.
  Keys are file paths (e.g. "index.html"), values are the complete file contents as strings.
- For conversational messages you may answer in plain text.
"#;
