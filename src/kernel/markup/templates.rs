/// Built-in raw-notes starters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    StandardHeader,
    CodeExample,
}

impl Template {
    pub const ALL: [Template; 2] = [Template::StandardHeader, Template::CodeExample];

    pub fn name(self) -> &'static str {
        match self {
            Template::StandardHeader => "standard-header",
            Template::CodeExample => "code-example",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn text(self) -> &'static str {
        match self {
            Template::StandardHeader => concat!(
                "{{h1}} Page Title\n",
                "\n",
                "{{img}} Logo | Company Logo | /assets/logo.png\n",
                "\n",
                "* Introduction line 1.\n",
                "* Introduction line 2.\n",
                "\n",
                "{{h2}} Section 1\n",
                "\n",
                "* Point 1\n",
                "* Point 2",
            ),
            Template::CodeExample => concat!(
                "{{h2}} Code Example\n",
                "\n",
                "* Here is a command to run:\n",
                "{{exec}}\n",
                "echo \"Hello KillerCoda!\"\n",
                "\n",
                "* Here is some configuration to copy:\n",
                "{{copy}}\n",
                "[settings]\n",
                "user = admin\n",
                "mode = test",
            ),
        }
    }

    /// Prepends the template, separated from existing text by a blank line.
    pub fn insert_into(self, current: &str) -> String {
        format!("{}\n\n{}", self.text(), current)
    }
}
