//! Form-field parsing into typed calculator inputs.
//!
//! Field names follow the calculator web forms (`idade`, `sexo`, `etnia`,
//! `creatinina`, `colesterol-total`, `hdl`, `pas`, `pas-tratada`,
//! `fumante`, `diabetes`). English aliases are accepted as well.
//! Checkbox fields are true only for the literal `true`.

use std::collections::BTreeMap;

use crate::domain::{CardioInputs, Ethnicity, RenalInputs, Sex};
use crate::{Result, RiskcalcError};

const AGE: &[&str] = &["idade", "age"];
const SEX: &[&str] = &["sexo", "sex"];
const ETHNICITY: &[&str] = &["etnia", "ethnicity"];
const CREATININE: &[&str] = &["creatinina", "creatinine"];
const TOTAL_CHOLESTEROL: &[&str] = &["colesterol-total", "total-cholesterol"];
const HDL: &[&str] = &["hdl"];
const SYSTOLIC_BP: &[&str] = &["pas", "systolic-bp"];
const BP_TREATED: &[&str] = &["pas-tratada", "bp-treated"];
const SMOKER: &[&str] = &["fumante", "smoker"];
const DIABETIC: &[&str] = &["diabetes", "diabetic"];

/// Raw submitted form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: BTreeMap<String, String>,
}

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `key=value` strings, as passed on a command line.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an argument without `=`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut form = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                RiskcalcError::InvalidInput(format!("Expected key=value, got {pair:?}"))
            })?;
            form.insert(key, value);
        }
        Ok(form)
    }

    /// Insert a field. Keys are matched case-insensitively and `_` is
    /// treated as `-`.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(normalize_key(key), value.to_string());
    }

    fn get(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .find_map(|name| self.fields.get(*name))
            .map(String::as_str)
    }

    fn require(&self, names: &[&str]) -> Result<&str> {
        self.get(names).ok_or_else(|| {
            RiskcalcError::InvalidInput(format!("Missing field {:?}", names[0]))
        })
    }

    fn integer(&self, names: &[&str]) -> Result<u32> {
        let raw = self.require(names)?;
        raw.trim().parse().map_err(|_| {
            RiskcalcError::InvalidInput(format!("Field {:?} is not an integer: {raw:?}", names[0]))
        })
    }

    fn real(&self, names: &[&str]) -> Result<f64> {
        let raw = self.require(names)?;
        let value: f64 = raw.trim().parse().map_err(|_| {
            RiskcalcError::InvalidInput(format!("Field {:?} is not a number: {raw:?}", names[0]))
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RiskcalcError::InvalidInput(format!(
                "Field {:?} is not finite: {raw:?}",
                names[0]
            )))
        }
    }

    fn flag(&self, names: &[&str]) -> bool {
        self.get(names) == Some("true")
    }

    fn sex(&self) -> Result<Sex> {
        self.require(SEX)?.parse()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut form = Self::new();
        for (k, v) in iter {
            form.insert(k.as_ref(), v.as_ref());
        }
        form
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

fn invalid(errors: Vec<String>) -> RiskcalcError {
    RiskcalcError::InvalidInput(errors.join("; "))
}

fn warn_implausible(warnings: &[String]) {
    for warning in warnings {
        tracing::warn!("Implausible form value accepted: {}", warning);
    }
}

/// Parse and validate eGFR calculator fields.
///
/// Only unparsable, non-finite or non-positive creatinine values are
/// rejected; atypical values are logged and passed through.
///
/// # Errors
/// Returns `InvalidInput` for missing or malformed fields.
pub fn parse_renal_form(form: &FormFields) -> Result<RenalInputs> {
    let inputs = RenalInputs {
        age: form.integer(AGE)?,
        sex: form.sex()?,
        ethnicity: Ethnicity::from_label(form.get(ETHNICITY).unwrap_or_default()),
        creatinine: form.real(CREATININE)?,
    };
    inputs.validate().map_err(invalid)?;
    warn_implausible(&inputs.plausibility_warnings());
    Ok(inputs)
}

/// Parse and validate cardiovascular calculator fields.
///
/// # Errors
/// Returns `InvalidInput` for missing, malformed or non-finite fields.
pub fn parse_cardio_form(form: &FormFields) -> Result<CardioInputs> {
    let inputs = CardioInputs {
        age: form.integer(AGE)?,
        sex: form.sex()?,
        hdl: form.real(HDL)?,
        total_cholesterol: form.real(TOTAL_CHOLESTEROL)?,
        systolic_bp: form.real(SYSTOLIC_BP)?,
        bp_treated: form.flag(BP_TREATED),
        diabetic: form.flag(DIABETIC),
        smoker: form.flag(SMOKER),
    };
    inputs.validate().map_err(invalid)?;
    warn_implausible(&inputs.plausibility_warnings());
    Ok(inputs)
}
