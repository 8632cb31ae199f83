use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::Scope;

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", <&'static str>::from(*self))
    }
}

impl From<Scope> for &'static str {
    fn from(scope: Scope) -> &'static str {
        match scope {
            Scope::Own => "own",
            Scope::Sub => "sub",
            Scope::All => "all",
            Scope::Unknown => "unknown",
        }
    }
}

impl FromStr for Scope {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "own" => Ok(Scope::Own),
            "sub" => Ok(Scope::Sub),
            "all" => Ok(Scope::All),
            // Unknown,
            s => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

#[cfg(feature = "clap")]
mod clap {
    use ::clap::{
        ValueEnum,
        builder::PossibleValue,
    };
    use super::*;

    impl ValueEnum for Scope {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Scope::Own,
                Scope::Sub,
                Scope::All,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            match self {
                Scope::Own => Some(PossibleValue::new("own")),
                Scope::Sub => Some(PossibleValue::new("sub")),
                Scope::All => Some(PossibleValue::new("all")),
                Scope::Unknown => None,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::Scope;
    use crate::error::ValueError;

    #[test]
    fn smoke() -> anyhow::Result<()> {
        assert_eq!(Scope::Own.to_string(), "own");
        assert_eq!(Scope::Own, Scope::from_str("own")?);
        assert_eq!(Scope::Sub, Scope::from_str("SUB")?);
        assert_eq!(Scope::All.to_string(), "all");
        assert_eq!(Scope::All, Scope::from_str("all")?);

        // error conversion
        assert!(Scope::from_str("unknown").is_err());
        assert!(matches!(
            Scope::from_str("everything")
                .expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "everything",
        ));

        // infallable conversion
        assert_eq!(
            Scope::from_str("everything")
                .unwrap_or_default(),
            Scope::Unknown,
        );
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Scope::Sub)?, r#""sub""#);
        assert_eq!(serde_json::from_str::<Scope>(r#""all""#)?, Scope::All);
        Ok(())
    }
}
