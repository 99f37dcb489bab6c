use std::{fmt, str::FromStr};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::model::structures::{playlist::Playlist, rating_inputs::RatingInputs};

/// Prefix accepted in front of any allow-listed function name (`Math.max`).
pub const MATH_NAMESPACE: &str = "Math.";

/// The fixed set of numeric inputs a formula may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Variable {
    Ones,
    Twos,
    Threes,
    Fours,
    OnesGames,
    TwosGames,
    ThreesGames,
    FoursGames,
    TotalGames
}

impl Variable {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Variable::Ones => "Current 1v1 rating",
            Variable::Twos => "Current 2v2 rating",
            Variable::Threes => "Current 3v3 rating",
            Variable::Fours => "Current 4v4 rating",
            Variable::OnesGames => "Games played in 1v1",
            Variable::TwosGames => "Games played in 2v2",
            Variable::ThreesGames => "Games played in 3v3",
            Variable::FoursGames => "Games played in 4v4",
            Variable::TotalGames => "Games played across all playlists"
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct VariableSet {
    allowed: IndexSet<Variable>
}

impl VariableSet {
    pub fn new(allowed: impl IntoIterator<Item = Variable>) -> VariableSet {
        VariableSet {
            allowed: allowed.into_iter().collect()
        }
    }

    /// Every rating and games-played variable.
    pub fn standard() -> VariableSet {
        VariableSet::new(Variable::iter())
    }

    pub fn resolve(&self, name: &str) -> Option<Variable> {
        Variable::from_str(name)
            .ok()
            .filter(|variable| self.allowed.contains(variable))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.allowed.iter()
    }

    pub fn names(&self) -> String {
        self.allowed.iter().map(Variable::name).join(", ")
    }
}

/// Values bound to each [`Variable`] for one evaluation.
/// `totalGames` is summed here once, never taken from the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bindings {
    current: [f64; 4],
    games: [f64; 4],
    total_games: f64
}

impl Bindings {
    pub fn from_inputs(inputs: &RatingInputs) -> Bindings {
        let mut current = [0.0; 4];
        let mut games = [0.0; 4];
        for (i, playlist) in Playlist::iter().enumerate() {
            current[i] = inputs.rating(playlist).current;
            games[i] = inputs.games(playlist) as f64;
        }

        Bindings {
            current,
            games,
            total_games: inputs.total_games() as f64
        }
    }

    pub fn get(&self, variable: Variable) -> f64 {
        match variable {
            Variable::Ones => self.current[0],
            Variable::Twos => self.current[1],
            Variable::Threes => self.current[2],
            Variable::Fours => self.current[3],
            Variable::OnesGames => self.games[0],
            Variable::TwosGames => self.games[1],
            Variable::ThreesGames => self.games[2],
            Variable::FoursGames => self.games[3],
            Variable::TotalGames => self.total_games
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize)
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == *n,
            Arity::AtLeast(n) => count >= *n
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n)
        }
    }
}

#[derive(Clone, Copy)]
pub struct Function {
    pub name: &'static str,
    pub arity: Arity,
    pub description: &'static str,
    apply: fn(&[f64]) -> f64
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Function {
    /// Callers must have checked `arity` first.
    pub fn apply(&self, args: &[f64]) -> f64 {
        (self.apply)(args)
    }
}

#[derive(Debug, Clone)]
pub struct FunctionTable {
    functions: IndexMap<&'static str, Function>
}

impl FunctionTable {
    pub fn new(functions: impl IntoIterator<Item = Function>) -> FunctionTable {
        FunctionTable {
            functions: functions.into_iter().map(|f| (f.name, f)).collect()
        }
    }

    /// `abs`, `max`, `min`, `sqrt`, `pow`, `floor`, `ceil`, `round`
    pub fn standard() -> FunctionTable {
        FunctionTable::new([
            Function {
                name: "abs",
                arity: Arity::Exactly(1),
                description: "Absolute value",
                apply: |a| a[0].abs()
            },
            Function {
                name: "max",
                arity: Arity::AtLeast(2),
                description: "Largest of the arguments",
                apply: |a| a.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            },
            Function {
                name: "min",
                arity: Arity::AtLeast(2),
                description: "Smallest of the arguments",
                apply: |a| a.iter().copied().fold(f64::INFINITY, f64::min)
            },
            Function {
                name: "sqrt",
                arity: Arity::Exactly(1),
                description: "Square root",
                apply: |a| a[0].sqrt()
            },
            Function {
                name: "pow",
                arity: Arity::Exactly(2),
                description: "First argument raised to the power of the second",
                apply: |a| a[0].powf(a[1])
            },
            Function {
                name: "floor",
                arity: Arity::Exactly(1),
                description: "Round down to an integer",
                apply: |a| a[0].floor()
            },
            Function {
                name: "ceil",
                arity: Arity::Exactly(1),
                description: "Round up to an integer",
                apply: |a| a[0].ceil()
            },
            Function {
                name: "round",
                arity: Arity::Exactly(1),
                description: "Round to the nearest integer, halves up",
                apply: |a| (a[0] + 0.5).floor()
            }
        ])
    }

    /// Looks a function up by name, accepting the `Math.` alias.
    pub fn resolve(&self, name: &str) -> Option<&Function> {
        let bare = name.strip_prefix(MATH_NAMESPACE).unwrap_or(name);
        self.functions.get(bare)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    pub fn names(&self) -> String {
        self.functions.keys().join(", ")
    }
}

lazy_static! {
    pub static ref KNOWN_VARIABLES: VariableSet = VariableSet::standard();
    pub static ref KNOWN_FUNCTIONS: FunctionTable = FunctionTable::standard();
}
