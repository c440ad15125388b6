pub mod compile_time {
    pub mod lexical {
        /// Longest abbreviation accepted by the tokenizers (characters)
        /// Guards the expansion stages against pathological editor input
        pub const MAX_ABBREVIATION_LENGTH: usize = 10_000;
    }

    pub mod conversion {
        /// Repeat limit applied by editor integrations (`li*1000000`)
        pub const EDITOR_MAX_REPEAT: usize = 400;

        /// Default repeat guard when the caller sets none
        pub const DEFAULT_MAX_REPEAT: usize = usize::MAX;
    }

    pub mod snippets {
        /// Nesting limit for markup snippets that expand into other snippets
        pub const MAX_SNIPPET_DEPTH: usize = 32;

        /// Marker for scope-restricted stylesheet contexts
        pub const SCOPE_PREFIX: &str = "@@";
    }

    pub mod lorem {
        /// Word count above which editor hints refuse lorem expansion
        pub const MAX_LOREM_WORDS: usize = 100_000;

        /// Upper bound of the product of `*N` multipliers considered by the hint check
        pub const MAX_LOREM_MULTIPLIER: usize = 400;

        /// Default word count of a bare `lorem`
        pub const DEFAULT_WORD_COUNT: usize = 30;
    }

    pub mod logging {
        /// Hard ceiling for context value length in log events
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Default truncation of context values
        pub const DEFAULT_LOG_MESSAGE_LENGTH: usize = 512;
    }
}
