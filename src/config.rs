use std::str::FromStr;

use serde::Deserialize;


#[derive(Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Eval,
    Lisp,
    C,
    Wat,
}

impl Backend {
    pub const NAMES: &'static [&'static str] = &["eval", "lisp", "c", "wat"];
}

impl Default for Backend {
    fn default() -> Backend { Backend::Eval }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Backend, String> {
        match s {
            "eval" => Ok(Backend::Eval),
            "lisp" => Ok(Backend::Lisp),
            "c" => Ok(Backend::C),
            "wat" => Ok(Backend::Wat),
            _ => Err(format!("unknown backend {:?}", s)),
        }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct CCompilerConfig {
    pub cc_path: String,
    pub cc_args: Vec<String>,
}

impl Default for CCompilerConfig {
    fn default() -> CCompilerConfig {
        CCompilerConfig {
            cc_path: "cc".to_string(),
            cc_args: Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    pub c: CCompilerConfig,
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(s)
    }
}
