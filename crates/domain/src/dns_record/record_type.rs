use std::fmt;
use std::str::FromStr;

/// Record types the rule language and the logs know by name.
///
/// Any other 16-bit code is still carried through the codec untouched; this
/// table only drives mnemonic lookups in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    HINFO,
    MX,
    TXT,
    RP,
    AFSDB,
    SIG,
    KEY,
    AAAA,
    LOC,
    SRV,
    NAPTR,
    KX,
    CERT,
    DNAME,
    APL,
    SVCB,
    HTTPS,
}

impl RecordType {
    pub const ALL: [RecordType; 22] = [
        RecordType::A,
        RecordType::NS,
        RecordType::CNAME,
        RecordType::SOA,
        RecordType::PTR,
        RecordType::HINFO,
        RecordType::MX,
        RecordType::TXT,
        RecordType::RP,
        RecordType::AFSDB,
        RecordType::SIG,
        RecordType::KEY,
        RecordType::AAAA,
        RecordType::LOC,
        RecordType::SRV,
        RecordType::NAPTR,
        RecordType::KX,
        RecordType::CERT,
        RecordType::DNAME,
        RecordType::APL,
        RecordType::SVCB,
        RecordType::HTTPS,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
            RecordType::PTR => "PTR",
            RecordType::HINFO => "HINFO",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::RP => "RP",
            RecordType::AFSDB => "AFSDB",
            RecordType::SIG => "SIG",
            RecordType::KEY => "KEY",
            RecordType::AAAA => "AAAA",
            RecordType::LOC => "LOC",
            RecordType::SRV => "SRV",
            RecordType::NAPTR => "NAPTR",
            RecordType::KX => "KX",
            RecordType::CERT => "CERT",
            RecordType::DNAME => "DNAME",
            RecordType::APL => "APL",
            RecordType::SVCB => "SVCB",
            RecordType::HTTPS => "HTTPS",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::RP => 17,
            RecordType::AFSDB => 18,
            RecordType::SIG => 24,
            RecordType::KEY => 25,
            RecordType::AAAA => 28,
            RecordType::LOC => 29,
            RecordType::SRV => 33,
            RecordType::NAPTR => 35,
            RecordType::KX => 36,
            RecordType::CERT => 37,
            RecordType::DNAME => 39,
            RecordType::APL => 42,
            RecordType::SVCB => 64,
            RecordType::HTTPS => 65,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            12 => Some(RecordType::PTR),
            13 => Some(RecordType::HINFO),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            17 => Some(RecordType::RP),
            18 => Some(RecordType::AFSDB),
            24 => Some(RecordType::SIG),
            25 => Some(RecordType::KEY),
            28 => Some(RecordType::AAAA),
            29 => Some(RecordType::LOC),
            33 => Some(RecordType::SRV),
            35 => Some(RecordType::NAPTR),
            36 => Some(RecordType::KX),
            37 => Some(RecordType::CERT),
            39 => Some(RecordType::DNAME),
            42 => Some(RecordType::APL),
            64 => Some(RecordType::SVCB),
            65 => Some(RecordType::HTTPS),
            _ => None,
        }
    }

    /// Mnemonic for a raw code, falling back to the RFC 3597 `TYPEnnn` form.
    pub fn describe(code: u16) -> String {
        match Self::from_u16(code) {
            Some(rt) => rt.as_str().to_string(),
            None => format!("TYPE{}", code),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mnemonics are matched exactly as written; `a` is not `A`.
impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .iter()
            .copied()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| format!("Unknown record type: {}", s))
    }
}
