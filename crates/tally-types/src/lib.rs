//! # tally-types: Core types for `Tally`
//!
//! This crate contains the vocabulary shared by the trace generator, the
//! place-value model and the session facade:
//! - Arithmetic selectors ([`Operation`])
//! - Digit positions ([`Column`])
//! - Place-value tiers ([`Denomination`], [`PlaceDigits`])
//! - Counting objects and their origin ([`CountingObject`], [`Role`], [`Operand`])
//! - The fixed bucket set ([`BucketId`])
//! - Narration language ([`Locale`])

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

// ============================================================================
// Parse errors
// ============================================================================

/// Errors produced when parsing the textual forms used by the presentation
/// layer (operation selectors, bucket identifiers, locale tags).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("unknown denomination '{0}'")]
    UnknownDenomination(String),

    #[error("unknown bucket '{0}'")]
    UnknownBucket(String),

    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
}

// ============================================================================
// Operation
// ============================================================================

/// The arithmetic operation a practice session works on.
///
/// `Division` is kept so the selector is total, but no trace algorithm
/// exists for it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    #[default]
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// Symbol written between the operands in the column grid.
    pub fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }

    /// Short selector name (`add`, `sub`, `mul`, `div`).
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Addition => "add",
            Operation::Subtraction => "sub",
            Operation::Multiplication => "mul",
            Operation::Division => "div",
        }
    }

    /// Returns true if regrouping moves value towards the higher tier (carry)
    /// rather than the lower one (borrow).
    pub fn carries(self) -> bool {
        matches!(self, Operation::Addition | Operation::Multiplication)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Operation::Addition),
            "sub" | "subtraction" | "-" => Ok(Operation::Subtraction),
            "mul" | "multiplication" | "*" | "×" => Ok(Operation::Multiplication),
            "div" | "division" | "/" | "÷" => Ok(Operation::Division),
            _ => Err(ParseError::UnknownOperation(s.to_string())),
        }
    }
}

// ============================================================================
// Column - Copy (digit position, 0 = ones)
// ============================================================================

/// A digit position in a base-10 number.
///
/// Column 0 is the ones place; indices increase leftward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Column(usize);

impl Column {
    pub const ONES: Column = Column(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Returns `10^index`, saturating for columns far beyond any operand.
    pub fn place_value(self) -> u64 {
        10u64.saturating_pow(u32::try_from(self.0).unwrap_or(u32::MAX))
    }

    /// The next more-significant column.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The denomination modelled for this column, if any.
    pub fn denomination(self) -> Option<Denomination> {
        Denomination::ALL.get(self.0).copied()
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Column {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<Column> for usize {
    fn from(column: Column) -> Self {
        column.0
    }
}

// ============================================================================
// Denomination - Copy (fixed ladder 1 -> 10 -> 100)
// ============================================================================

/// Place-value tier of a counting object.
///
/// Only three tiers are modelled; there is nothing above `Hundred`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Denomination {
    One,
    Ten,
    Hundred,
}

impl Denomination {
    /// All tiers, lowest first.
    pub const ALL: [Denomination; 3] = [Denomination::One, Denomination::Ten, Denomination::Hundred];

    pub fn value(self) -> u32 {
        match self {
            Denomination::One => 1,
            Denomination::Ten => 10,
            Denomination::Hundred => 100,
        }
    }

    /// The tier obtained by exchanging ten of this one, if modelled.
    pub fn next(self) -> Option<Self> {
        match self {
            Denomination::One => Some(Denomination::Ten),
            Denomination::Ten => Some(Denomination::Hundred),
            Denomination::Hundred => None,
        }
    }

    /// The tier obtained by breaking one of this into ten, if any.
    pub fn previous(self) -> Option<Self> {
        match self {
            Denomination::One => None,
            Denomination::Ten => Some(Denomination::One),
            Denomination::Hundred => Some(Denomination::Ten),
        }
    }

    /// The grid column this tier corresponds to.
    pub fn column(self) -> Column {
        match self {
            Denomination::One => Column(0),
            Denomination::Ten => Column(1),
            Denomination::Hundred => Column(2),
        }
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u32> for Denomination {
    type Error = ParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Denomination::One),
            10 => Ok(Denomination::Ten),
            100 => Ok(Denomination::Hundred),
            other => Err(ParseError::UnknownDenomination(other.to_string())),
        }
    }
}

impl FromStr for Denomination {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map_err(|_| ParseError::UnknownDenomination(s.to_string()))
            .and_then(Denomination::try_from)
    }
}

/// Hundreds/tens/ones decomposition of an operand.
///
/// Values of 1000 or more keep their excess in `hundreds`, matching how
/// the coins are laid out: there is no thousands tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PlaceDigits {
    pub hundreds: u32,
    pub tens: u32,
    pub ones: u32,
}

impl PlaceDigits {
    pub fn of(value: u32) -> Self {
        Self {
            hundreds: value / 100,
            tens: (value % 100) / 10,
            ones: value % 10,
        }
    }

    /// Number of objects of the given tier.
    pub fn count(&self, denomination: Denomination) -> u32 {
        match denomination {
            Denomination::One => self.ones,
            Denomination::Ten => self.tens,
            Denomination::Hundred => self.hundreds,
        }
    }

    pub fn value(&self) -> u64 {
        u64::from(self.hundreds) * 100 + u64::from(self.tens) * 10 + u64::from(self.ones)
    }
}

// ============================================================================
// Counting objects
// ============================================================================

/// Which operand a source area belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operand {
    A,
    B,
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::A => write!(f, "A"),
            Operand::B => write!(f, "B"),
        }
    }
}

/// Origin tag of a counting object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Created from operand A's digit decomposition (the minuend in subtraction).
    OperandA,
    /// Created from operand B's digit decomposition (the subtrahend in subtraction).
    OperandB,
    /// Produced by a regroup exchange.
    Exchange,
}

impl Role {
    /// Order in which roles are consumed when a bucket gives up fungible objects.
    pub const DRAIN_ORDER: [Role; 3] = [Role::Exchange, Role::OperandA, Role::OperandB];

    pub fn of_operand(operand: Operand) -> Self {
        match operand {
            Operand::A => Role::OperandA,
            Operand::B => Role::OperandB,
        }
    }
}

/// One physical unit of a given denomination.
///
/// Objects are fungible: two objects with the same denomination and role
/// are indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountingObject {
    pub denomination: Denomination,
    pub role: Role,
}

impl CountingObject {
    pub fn new(denomination: Denomination, role: Role) -> Self {
        Self { denomination, role }
    }

    pub fn value(&self) -> u32 {
        self.denomination.value()
    }
}

// ============================================================================
// Buckets
// ============================================================================

/// Identifier of one of the nine fixed buckets.
///
/// The textual form (`source-A-10`, `result-100`, ...) is what the
/// presentation layer uses to tag its drop zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BucketId {
    Source {
        operand: Operand,
        denomination: Denomination,
    },
    Result(Denomination),
}

impl BucketId {
    pub const ALL: [BucketId; 9] = [
        BucketId::source(Operand::A, Denomination::One),
        BucketId::source(Operand::A, Denomination::Ten),
        BucketId::source(Operand::A, Denomination::Hundred),
        BucketId::source(Operand::B, Denomination::One),
        BucketId::source(Operand::B, Denomination::Ten),
        BucketId::source(Operand::B, Denomination::Hundred),
        BucketId::Result(Denomination::One),
        BucketId::Result(Denomination::Ten),
        BucketId::Result(Denomination::Hundred),
    ];

    pub const fn source(operand: Operand, denomination: Denomination) -> Self {
        BucketId::Source {
            operand,
            denomination,
        }
    }

    pub const fn result(denomination: Denomination) -> Self {
        BucketId::Result(denomination)
    }

    /// The only denomination this bucket accepts.
    pub fn denomination(self) -> Denomination {
        match self {
            BucketId::Source { denomination, .. } | BucketId::Result(denomination) => denomination,
        }
    }

    pub fn is_result(self) -> bool {
        matches!(self, BucketId::Result(_))
    }

    /// The operand a source bucket belongs to.
    pub fn operand(self) -> Option<Operand> {
        match self {
            BucketId::Source { operand, .. } => Some(operand),
            BucketId::Result(_) => None,
        }
    }
}

impl Display for BucketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketId::Source {
                operand,
                denomination,
            } => write!(f, "source-{operand}-{denomination}"),
            BucketId::Result(denomination) => write!(f, "result-{denomination}"),
        }
    }
}

impl FromStr for BucketId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ParseError::UnknownBucket(s.to_string());
        let parts: Vec<&str> = s.split('-').collect();

        match parts.as_slice() {
            ["source", operand, denomination] => {
                let operand = match *operand {
                    "A" | "a" => Operand::A,
                    "B" | "b" => Operand::B,
                    _ => return Err(unknown()),
                };
                let denomination = denomination.parse().map_err(|_| unknown())?;
                Ok(BucketId::source(operand, denomination))
            }
            ["result", denomination] => {
                let denomination = denomination.parse().map_err(|_| unknown())?;
                Ok(BucketId::result(denomination))
            }
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for BucketId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BucketId> for String {
    fn from(id: BucketId) -> Self {
        id.to_string()
    }
}

// ============================================================================
// Locale
// ============================================================================

/// Language used to narrate trace steps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    Japanese,
    English,
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "jp" | "japanese" => Ok(Locale::Japanese),
            "en" | "english" => Ok(Locale::English),
            _ => Err(ParseError::UnknownLocale(s.to_string())),
        }
    }
}
