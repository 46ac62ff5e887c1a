/// Argument names the caller never wants compiled.
///
/// Matching is a plain prefix test on `"<name>="`, applied before reserved
/// names are recognised, so blacklisting `sort` drops `sort=...` too.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    prefixes: Vec<String>,
}

impl Blacklist {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            prefixes: names.iter().map(|n| format!("{}=", n.as_ref())).collect(),
        }
    }

    pub fn blocks(&self, arg: &str) -> bool {
        self.prefixes.iter().any(|p| arg.starts_with(p.as_str()))
    }
}
