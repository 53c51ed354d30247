//! Named kinship relations and the expressions that define them.

use kindred_facts::{Gender, ParentRole};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KinshipError;
use crate::expr::KinExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
    Father,
    Mother,
    Parent,
    GrandFather,
    GrandMother,
    GrandParent,
    Children,
    Son,
    Daughter,
    GrandChild,
    GrandSon,
    GrandDaughter,
    GrandGrandChild,
    GrandGrandSon,
    GrandGrandDaughter,
    Siblings,
    Brother,
    Sister,
    UncleOrAunt,
    Uncle,
    Aunt,
    Niece,
    Nephew,
    Cousin,
    Wife,
    Husband,
    SisterInLaw,
    BrotherInLaw,
    MotherInLaw,
    FatherInLaw,
    StepMother,
    StepFather,
}

impl Relation {
    pub const ALL: [Relation; 32] = [
        Relation::Father,
        Relation::Mother,
        Relation::Parent,
        Relation::GrandFather,
        Relation::GrandMother,
        Relation::GrandParent,
        Relation::Children,
        Relation::Son,
        Relation::Daughter,
        Relation::GrandChild,
        Relation::GrandSon,
        Relation::GrandDaughter,
        Relation::GrandGrandChild,
        Relation::GrandGrandSon,
        Relation::GrandGrandDaughter,
        Relation::Siblings,
        Relation::Brother,
        Relation::Sister,
        Relation::UncleOrAunt,
        Relation::Uncle,
        Relation::Aunt,
        Relation::Niece,
        Relation::Nephew,
        Relation::Cousin,
        Relation::Wife,
        Relation::Husband,
        Relation::SisterInLaw,
        Relation::BrotherInLaw,
        Relation::MotherInLaw,
        Relation::FatherInLaw,
        Relation::StepMother,
        Relation::StepFather,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Father => "father",
            Relation::Mother => "mother",
            Relation::Parent => "parent",
            Relation::GrandFather => "grand-father",
            Relation::GrandMother => "grand-mother",
            Relation::GrandParent => "grand-parent",
            Relation::Children => "children",
            Relation::Son => "son",
            Relation::Daughter => "daughter",
            Relation::GrandChild => "grand-child",
            Relation::GrandSon => "grand-son",
            Relation::GrandDaughter => "grand-daughter",
            Relation::GrandGrandChild => "grand-grand-child",
            Relation::GrandGrandSon => "grand-grand-son",
            Relation::GrandGrandDaughter => "grand-grand-daughter",
            Relation::Siblings => "siblings",
            Relation::Brother => "brother",
            Relation::Sister => "sister",
            Relation::UncleOrAunt => "uncle-or-aunt",
            Relation::Uncle => "uncle",
            Relation::Aunt => "aunt",
            Relation::Niece => "niece",
            Relation::Nephew => "nephew",
            Relation::Cousin => "cousin",
            Relation::Wife => "wife",
            Relation::Husband => "husband",
            Relation::SisterInLaw => "sister-in-law",
            Relation::BrotherInLaw => "brother-in-law",
            Relation::MotherInLaw => "mother-in-law",
            Relation::FatherInLaw => "father-in-law",
            Relation::StepMother => "step-mother",
            Relation::StepFather => "step-father",
        }
    }

    /// The relation as set algebra over the derivation primitives.
    pub fn expr(self) -> KinExpr {
        use Gender::{Female, Male};

        let x = KinExpr::input;
        match self {
            Relation::Father => x().father(),
            Relation::Mother => x().mother(),
            Relation::Parent => x().parent(),
            Relation::GrandFather => x().ancestors(ParentRole::Father, 2),
            Relation::GrandMother => x().ancestors(ParentRole::Mother, 2),
            Relation::GrandParent => Relation::GrandFather
                .expr()
                .union(Relation::GrandMother.expr()),
            Relation::Children => x().children(None),
            Relation::Son => x().children(Some(Male)),
            Relation::Daughter => x().children(Some(Female)),
            Relation::GrandChild => x().descendants(2, None),
            Relation::GrandSon => x().descendants(2, Some(Male)),
            Relation::GrandDaughter => x().descendants(2, Some(Female)),
            Relation::GrandGrandChild => x().descendants(3, None),
            Relation::GrandGrandSon => x().descendants(3, Some(Male)),
            Relation::GrandGrandDaughter => x().descendants(3, Some(Female)),
            Relation::Siblings => x().siblings(),
            Relation::Brother => x().siblings().with_gender(Male),
            Relation::Sister => x().siblings().with_gender(Female),
            Relation::UncleOrAunt => x().parent().siblings(),
            Relation::Uncle => x().parent().siblings().with_gender(Male),
            Relation::Aunt => x().parent().siblings().with_gender(Female),
            Relation::Niece => x().siblings().children(Some(Female)),
            Relation::Nephew => x().siblings().children(Some(Male)),
            Relation::Cousin => x().parent().siblings().children(None),
            Relation::Wife => x().spouse(Female),
            Relation::Husband => x().spouse(Male),
            Relation::SisterInLaw => through_spouse(|s| s.siblings().with_gender(Female)),
            Relation::BrotherInLaw => through_spouse(|s| s.siblings().with_gender(Male)),
            Relation::MotherInLaw => through_spouse(KinExpr::mother),
            Relation::FatherInLaw => through_spouse(KinExpr::father),
            Relation::StepMother => x().siblings().mother().except(x().mother()),
            Relation::StepFather => x().siblings().father().except(x().father()),
        }
    }
}

/// `f(Husband(x)) ∪ f(Wife(x))`: whichever spouse relation resolves.
fn through_spouse(f: impl Fn(KinExpr) -> KinExpr) -> KinExpr {
    f(KinExpr::input().spouse(Gender::Male)).union(f(KinExpr::input().spouse(Gender::Female)))
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Relation {
    type Err = KinshipError;

    /// Accepts `sister-in-law`, `sister_in_law` and `SisterInLaw` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Relation::ALL
            .into_iter()
            .find(|r| normalize(r.as_str()) == wanted)
            .ok_or_else(|| KinshipError::UnknownRelation {
                name: s.to_string(),
            })
    }
}
