//! Kinship expressions.
//!
//! Composite relations are not separate traversals: each one is a small tree
//! of set operations over the primitives in [`crate::derive`]. Builder
//! methods read inside-out like the relation they encode, e.g.
//! `KinExpr::input().parent().siblings().children(None)` is
//! `Children(Siblings(Parent(x)))`, i.e. cousins.

use kindred_facts::{FactBase, Gender, ParentRole};
use roaring::RoaringBitmap;
use std::fmt;

use crate::derive;
use crate::trace::{NoTrace, StepLog, TraceMode, Traced, WithTrace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KinExpr {
    /// The people the query is about.
    Input,
    /// Ancestors `level` generations up, ending in `role` (level 1 = parent).
    Ancestors {
        of: Box<KinExpr>,
        role: ParentRole,
        level: i64,
    },
    /// Descendants `level` generations down (level 1 = children).
    Descendants {
        of: Box<KinExpr>,
        level: i64,
        gender: Option<Gender>,
    },
    /// Spouse recorded with `gender`.
    Spouse { of: Box<KinExpr>, gender: Gender },
    /// Keep only people recorded with `gender`.
    WithGender { of: Box<KinExpr>, gender: Gender },
    Union(Box<KinExpr>, Box<KinExpr>),
    /// Left minus right.
    Except(Box<KinExpr>, Box<KinExpr>),
}

impl KinExpr {
    pub fn input() -> Self {
        KinExpr::Input
    }

    pub fn ancestors(self, role: ParentRole, level: i64) -> Self {
        KinExpr::Ancestors {
            of: Box::new(self),
            role,
            level,
        }
    }

    pub fn father(self) -> Self {
        self.ancestors(ParentRole::Father, 1)
    }

    pub fn mother(self) -> Self {
        self.ancestors(ParentRole::Mother, 1)
    }

    pub fn parent(self) -> Self {
        self.clone().father().union(self.mother())
    }

    pub fn descendants(self, level: i64, gender: Option<Gender>) -> Self {
        KinExpr::Descendants {
            of: Box::new(self),
            level,
            gender,
        }
    }

    pub fn children(self, gender: Option<Gender>) -> Self {
        self.descendants(1, gender)
    }

    /// `Children(Parent(x)) \ x`.
    pub fn siblings(self) -> Self {
        self.clone().parent().children(None).except(self)
    }

    pub fn spouse(self, gender: Gender) -> Self {
        KinExpr::Spouse {
            of: Box::new(self),
            gender,
        }
    }

    pub fn with_gender(self, gender: Gender) -> Self {
        KinExpr::WithGender {
            of: Box::new(self),
            gender,
        }
    }

    pub fn union(self, other: KinExpr) -> Self {
        KinExpr::Union(Box::new(self), Box::new(other))
    }

    pub fn except(self, other: KinExpr) -> Self {
        KinExpr::Except(Box::new(self), Box::new(other))
    }

    /// This node only, without its operands.
    pub fn label(&self) -> String {
        match self {
            KinExpr::Input => "input".to_string(),
            KinExpr::Ancestors { role, level, .. } => format!("ancestors({role}, {level})"),
            KinExpr::Descendants {
                level,
                gender: Some(gender),
                ..
            } => format!("descendants({level}, {gender})"),
            KinExpr::Descendants { level, .. } => format!("descendants({level})"),
            KinExpr::Spouse { gender, .. } => format!("spouse({gender})"),
            KinExpr::WithGender { gender, .. } => format!("with_gender({gender})"),
            KinExpr::Union(..) => "union".to_string(),
            KinExpr::Except(..) => "except".to_string(),
        }
    }

    /// Evaluate against `input` without recording a trace.
    pub fn evaluate(&self, facts: &FactBase, input: &RoaringBitmap) -> RoaringBitmap {
        let mut eval = Evaluator::<NoTrace>::new(facts, input);
        eval.eval(self)
    }

    /// Evaluate against `input`, recording one
    /// [`TraceEvent`](crate::trace::TraceEvent) per node.
    pub fn evaluate_traced(
        &self,
        facts: &FactBase,
        input: &RoaringBitmap,
    ) -> Traced<WithTrace, RoaringBitmap> {
        Evaluator::<WithTrace>::new(facts, input).run(self)
    }
}

impl fmt::Display for KinExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinExpr::Input => f.write_str("x"),
            KinExpr::Ancestors { of, role, level: 1 } => write!(f, "{role}({of})"),
            KinExpr::Ancestors { of, role, level } => write!(f, "{role}^{level}({of})"),
            KinExpr::Descendants { of, level, gender } => {
                write!(f, "children^{level}({of}")?;
                if let Some(gender) = gender {
                    write!(f, ", {gender}")?;
                }
                f.write_str(")")
            }
            KinExpr::Spouse { of, gender } => write!(f, "spouse({of}, {gender})"),
            KinExpr::WithGender { of, gender } => write!(f, "{gender}({of})"),
            KinExpr::Union(a, b) => write!(f, "({a} ∪ {b})"),
            KinExpr::Except(a, b) => write!(f, "({a} \\ {b})"),
        }
    }
}

struct Evaluator<'a, M: TraceMode> {
    facts: &'a FactBase,
    input: &'a RoaringBitmap,
    log: StepLog<M>,
}

impl<'a, M: TraceMode> Evaluator<'a, M> {
    fn new(facts: &'a FactBase, input: &'a RoaringBitmap) -> Self {
        Self {
            facts,
            input,
            log: StepLog::new(),
        }
    }

    fn run(mut self, expr: &KinExpr) -> Traced<M, RoaringBitmap> {
        let value = self.eval(expr);
        self.log.finish(value)
    }

    fn eval(&mut self, expr: &KinExpr) -> RoaringBitmap {
        self.log.enter();
        let facts = self.facts;
        let out = match expr {
            KinExpr::Input => self.input.clone(),
            KinExpr::Ancestors { of, role, level } => {
                let of = self.eval(of);
                derive::ancestors_at_level(facts, &of, *role, *level)
            }
            KinExpr::Descendants { of, level, gender } => {
                let of = self.eval(of);
                derive::descendants_at_level(facts, &of, *level, *gender)
            }
            KinExpr::Spouse { of, gender } => {
                let of = self.eval(of);
                derive::spouses(facts, &of, *gender)
            }
            KinExpr::WithGender { of, gender } => {
                let of = self.eval(of);
                derive::filter_by_gender(facts, &of, Some(*gender))
            }
            KinExpr::Union(a, b) => self.eval(a) | self.eval(b),
            KinExpr::Except(a, b) => self.eval(a) - self.eval(b),
        };

        tracing::trace!(step = %expr.label(), size = out.len(), "evaluated kin expression");
        self.log.leave(|| (expr.label(), facts.names(&out)));
        out
    }
}
