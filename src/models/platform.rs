use std::fmt;

/// Destination social networks. Closed set; every dispatch over platforms
/// is an exhaustive match so adding a variant is compiler-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    #[default]
    Twitter,
    LinkedIn,
    Facebook,
    Threads,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Facebook,
        Platform::Threads,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
            Platform::Threads => "Threads",
        }
    }

    /// Platform-specific guidance embedded in the generation prompt.
    /// Length limits live only here; nothing enforces them on the result.
    pub fn guidance(&self) -> &'static str {
        match self {
            Platform::Twitter => {
                "The post must be under 280 characters. Use 2-3 relevant hashtags. \
                 The tone should be punchy and engaging."
            }
            Platform::LinkedIn => {
                "The post should be professional and insightful. Use 3-5 relevant hashtags. \
                 Encourage discussion and professional engagement."
            }
            Platform::Facebook => {
                "The post should be friendly and conversational. Use a mix of statements \
                 and questions to encourage comments and shares. Include 2-4 relevant hashtags."
            }
            Platform::Threads => {
                "The post can be up to 500 characters. The tone should be conversational \
                 and authentic. Feel free to use relevant hashtags and ask questions to \
                 start a conversation."
            }
        }
    }

    pub fn next(&self) -> Platform {
        match self {
            Platform::Twitter => Platform::LinkedIn,
            Platform::LinkedIn => Platform::Facebook,
            Platform::Facebook => Platform::Threads,
            Platform::Threads => Platform::Twitter,
        }
    }

    pub fn prev(&self) -> Platform {
        match self {
            Platform::Twitter => Platform::Threads,
            Platform::LinkedIn => Platform::Twitter,
            Platform::Facebook => Platform::LinkedIn,
            Platform::Threads => Platform::Facebook,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
