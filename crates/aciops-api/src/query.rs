// Query-string builder for class and managed-object reads.
//
// The controller selects scope and subtree expansion through a fixed set
// of query options (`query-target`, `rsp-subtree`, filters). Keeping them
// typed avoids hand-assembled query strings at every call site.

/// Which objects a query returns relative to the addressed class or DN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum QueryTarget {
    #[strum(serialize = "self")]
    SelfOnly,
    Children,
    Subtree,
}

/// How much of each returned object's subtree is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RspSubtree {
    No,
    Children,
    Full,
}

/// Ordered list of query options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn target(self, target: QueryTarget) -> Self {
        self.push("query-target", target.as_ref())
    }

    pub fn target_subtree_class(self, classes: &[&str]) -> Self {
        self.push("target-subtree-class", classes.join(","))
    }

    pub fn target_filter(self, filter: impl Into<String>) -> Self {
        self.push("query-target-filter", filter)
    }

    pub fn subtree(self, subtree: RspSubtree) -> Self {
        self.push("rsp-subtree", subtree.as_ref())
    }

    pub fn subtree_class(self, classes: &[&str]) -> Self {
        self.push("rsp-subtree-class", classes.join(","))
    }

    pub fn subtree_include(self, include: impl Into<String>) -> Self {
        self.push("rsp-subtree-include", include)
    }

    pub fn subtree_filter(self, filter: impl Into<String>) -> Self {
        self.push("rsp-subtree-filter", filter)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Equality filter expression: `eq(fvCEp.mac,"00:11:22:33:44:55")`.
pub fn eq_filter(property: &str, value: &str) -> String {
    format!("eq({property},\"{value}\")")
}
