//! Controlled vocabularies for header fields.
//!
//! Each enum is bound to one tag and read through
//! [`TypedField`](crate::core::attributes::TypedField). Canonical spellings
//! follow the SAM format: lower case for `SO`, `GO` and `TP`, upper case
//! for `PL`.

use serde::Serialize;

use crate::core::attributes::Vocabulary;

/// Sort order of alignments (`SO` on `@HD`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Unsorted,
    Queryname,
    Coordinate,
    /// Absent, or a value that is not one of the above
    Unknown,
}

impl Vocabulary for SortOrder {
    const TAG: &'static str = "SO";
    const ALL: &'static [Self] = &[Self::Unsorted, Self::Queryname, Self::Coordinate];
    const UNKNOWN: Self = Self::Unknown;
    const DEFAULT: Self = Self::Unknown;

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Unsorted => "unsorted",
            Self::Queryname => "queryname",
            Self::Coordinate => "coordinate",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Grouping of alignments (`GO` on `@HD`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOrder {
    /// No grouping; the default when `GO` is absent
    None,
    Query,
    Reference,
    Unknown,
}

impl Vocabulary for GroupOrder {
    const TAG: &'static str = "GO";
    const ALL: &'static [Self] = &[Self::None, Self::Query, Self::Reference];
    const UNKNOWN: Self = Self::Unknown;
    const DEFAULT: Self = Self::None;

    fn canonical_name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Query => "query",
            Self::Reference => "reference",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for GroupOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Sequencing platform (`PL` on `@RG`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Capillary,
    Dnbseq,
    Element,
    Helicos,
    Illumina,
    Iontorrent,
    Ls454,
    Ont,
    Pacbio,
    Singular,
    Solid,
    Ultima,
    Unknown,
}

impl Vocabulary for Platform {
    const TAG: &'static str = "PL";
    const ALL: &'static [Self] = &[
        Self::Capillary,
        Self::Dnbseq,
        Self::Element,
        Self::Helicos,
        Self::Illumina,
        Self::Iontorrent,
        Self::Ls454,
        Self::Ont,
        Self::Pacbio,
        Self::Singular,
        Self::Solid,
        Self::Ultima,
    ];
    const UNKNOWN: Self = Self::Unknown;
    const DEFAULT: Self = Self::Unknown;

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Capillary => "CAPILLARY",
            Self::Dnbseq => "DNBSEQ",
            Self::Element => "ELEMENT",
            Self::Helicos => "HELICOS",
            Self::Illumina => "ILLUMINA",
            Self::Iontorrent => "IONTORRENT",
            Self::Ls454 => "LS454",
            Self::Ont => "ONT",
            Self::Pacbio => "PACBIO",
            Self::Singular => "SINGULAR",
            Self::Solid => "SOLID",
            Self::Ultima => "ULTIMA",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Molecule topology (`TP` on `@SQ`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Linear,
    Circular,
    Unknown,
}

impl Vocabulary for Topology {
    const TAG: &'static str = "TP";
    const ALL: &'static [Self] = &[Self::Linear, Self::Circular];
    const UNKNOWN: Self = Self::Unknown;
    const DEFAULT: Self = Self::Linear;

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Circular => "circular",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_from_name_any_case() {
        for name in ["coordinate", "COORDINATE", "cOoRdinate", "Coordinate"] {
            assert_eq!(SortOrder::from_name(name), SortOrder::Coordinate);
        }
        assert_eq!(SortOrder::from_name("QUERYNAME"), SortOrder::Queryname);
        assert_eq!(SortOrder::from_name("unknown"), SortOrder::Unknown);
        assert_eq!(SortOrder::from_name("UNKNOWN"), SortOrder::Unknown);
    }

    #[test]
    fn test_unmatched_names_fall_back() {
        assert_eq!(SortOrder::from_name(""), SortOrder::Unknown);
        assert_eq!(SortOrder::from_name("coord"), SortOrder::Unknown);
        assert_eq!(SortOrder::from_name(" coordinate"), SortOrder::Unknown);
        assert_eq!(GroupOrder::from_name("by-query"), GroupOrder::Unknown);
        assert_eq!(Platform::from_name("nanopore"), Platform::Unknown);
        assert_eq!(Topology::from_name("ring"), Topology::Unknown);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for &so in SortOrder::ALL {
            assert_eq!(SortOrder::from_name(so.canonical_name()), so);
        }
        for &go in GroupOrder::ALL {
            assert_eq!(GroupOrder::from_name(go.canonical_name()), go);
        }
        for &pl in Platform::ALL {
            assert_eq!(Platform::from_name(&pl.canonical_name().to_lowercase()), pl);
        }
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(SortOrder::Queryname.to_string(), "queryname");
        assert_eq!(GroupOrder::None.to_string(), "none");
        assert_eq!(Platform::Pacbio.to_string(), "PACBIO");
        assert_eq!(Topology::Circular.to_string(), "circular");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SortOrder::DEFAULT, SortOrder::Unknown);
        assert_eq!(GroupOrder::DEFAULT, GroupOrder::None);
        assert_eq!(Topology::DEFAULT, Topology::Linear);
    }
}
