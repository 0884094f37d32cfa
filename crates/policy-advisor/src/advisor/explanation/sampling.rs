/// Decoding settings sent with each generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub repeat_penalty: f32,
}

impl SamplingOptions {
    /// Recommendation rationales.
    pub const RATIONALE: SamplingOptions = SamplingOptions {
        max_tokens: 100,
        temperature: 0.7,
        top_k: 50,
        top_p: 0.9,
        repeat_penalty: 1.1,
    };

    /// Free-form question answers: shorter and more conservative.
    pub const ANSWER: SamplingOptions = SamplingOptions {
        max_tokens: 80,
        temperature: 0.6,
        top_k: 40,
        top_p: 0.8,
        repeat_penalty: 1.1,
    };
}
