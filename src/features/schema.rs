//! Static column layout of a flow feature vector. Independent of any run's data.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Numeric,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Numeric => write!(f, "NUMERIC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
}

const fn string(name: &'static str) -> Attribute {
    Attribute {
        name,
        kind: AttributeKind::String,
    }
}

const fn numeric(name: &'static str) -> Attribute {
    Attribute {
        name,
        kind: AttributeKind::Numeric,
    }
}

pub const FEATURE_DIM: usize = 49;

/// Column names as consumed by existing datasets; `sck` is the ACK fraction.
pub const ATTRIBUTES: [Attribute; FEATURE_DIM] = [
    string("ipup"),
    string("ipdwn"),
    numeric("portup"),
    numeric("portdwn"),
    numeric("duration"),
    numeric("pkgpersecup"),
    numeric("pkgpersecdwn"),
    numeric("bytespersecup"),
    numeric("bytespersecdwn"),
    numeric("pkgsizeup-max"),
    numeric("pkgsizeup-min"),
    numeric("pkgsizeup-avg"),
    numeric("pkgsizedwn-max"),
    numeric("pkgsizedwn-min"),
    numeric("pkgsizedwn-avg"),
    numeric("tcpwinup-max"),
    numeric("tcpwinup-min"),
    numeric("tcpwinup-avg"),
    numeric("tcpwindwn-max"),
    numeric("tcpwindwn-min"),
    numeric("tcpwindwn-avg"),
    numeric("ttlup-max"),
    numeric("ttlup-min"),
    numeric("ttlup-avg"),
    numeric("ttldwn-max"),
    numeric("ttldwn-min"),
    numeric("ttldwn-avg"),
    numeric("percup-fin"),
    numeric("percup-syn"),
    numeric("percup-rst"),
    numeric("percup-psh"),
    numeric("percup-sck"),
    numeric("percup-urg"),
    numeric("percdwn-fin"),
    numeric("percdwn-syn"),
    numeric("percdwn-rst"),
    numeric("percdwn-psh"),
    numeric("percdwn-sck"),
    numeric("percdwn-urg"),
    numeric("percup-chgCiph"),
    numeric("percup-alert"),
    numeric("percup-hand"),
    numeric("percup-app"),
    numeric("percup-heart"),
    numeric("percdwn-chgCiph"),
    numeric("percdwn-alert"),
    numeric("percdwn-hand"),
    numeric("percdwn-app"),
    numeric("percdwn-heart"),
];

pub fn position(name: &str) -> Option<usize> {
    ATTRIBUTES.iter().position(|a| a.name == name)
}
