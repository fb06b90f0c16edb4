/// Typed input objects and field-level validation rules
///
/// Every input crossing the HTTP boundary is deserialized into one of these
/// types and validated by a pure function that either yields a normalized
/// value for the persistence layer or a structured list of field errors.
/// The same rules back the public submission form and the operator edit
/// flow, so they live in the shared crate.
///
/// User-facing messages are in Spanish, matching the product's audience.
///
/// # Example
///
/// ```
/// use novatrack_shared::validation::TicketInput;
///
/// let input = TicketInput {
///     cedula: "1032456789".to_string(),
///     nombre_completo: "Ana María Pérez".to_string(),
///     correo: "ana@example.com".to_string(),
///     celular: "3001234567".to_string(),
///     descripcion: "El ascensor de la torre B no funciona".to_string(),
///     estado: None,
/// };
///
/// let created = input.validated().expect("valid input");
/// assert_eq!(created.cedula, "1032456789");
/// ```

use crate::models::ticket::{CreateTicket, TicketStatus, UpdateTicket};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed validation (wire name)
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Full-record ticket input from the public submission form
///
/// `estado` deserializes if present but is never honored: creation always
/// lands in Pendiente.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketInput {
    #[validate(length(min = 5, max = 15, message = "La cédula debe tener entre 5 y 15 dígitos"))]
    pub cedula: String,

    #[validate(length(
        min = 3,
        max = 120,
        message = "El nombre completo debe tener entre 3 y 120 caracteres"
    ))]
    pub nombre_completo: String,

    #[validate(email(message = "Ingresa un correo válido"))]
    pub correo: String,

    #[validate(length(equal = 10, message = "El número de celular debe tener 10 dígitos"))]
    pub celular: String,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Describe la novedad con entre 10 y 500 caracteres"
    ))]
    pub descripcion: String,

    /// Ignored on create; present so that clients sending it are not rejected
    #[serde(default)]
    pub estado: Option<TicketStatus>,
}

/// Partial ticket input for operator edits: same rules, all fields optional
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketPatch {
    #[validate(length(min = 5, max = 15, message = "La cédula debe tener entre 5 y 15 dígitos"))]
    pub cedula: Option<String>,

    #[validate(length(
        min = 3,
        max = 120,
        message = "El nombre completo debe tener entre 3 y 120 caracteres"
    ))]
    pub nombre_completo: Option<String>,

    #[validate(email(message = "Ingresa un correo válido"))]
    pub correo: Option<String>,

    #[validate(length(equal = 10, message = "El número de celular debe tener 10 dígitos"))]
    pub celular: Option<String>,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Describe la novedad con entre 10 y 500 caracteres"
    ))]
    pub descripcion: Option<String>,

    pub estado: Option<TicketStatus>,
}

/// Registration input for a new operator account
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(email(message = "Correo electrónico inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,

    #[validate(length(min = 2, message = "El nombre debe tener al menos 2 caracteres"))]
    pub nombre: String,

    /// Required when the deployment configures an invite code
    #[serde(default)]
    pub invite_code: Option<String>,
}

/// Login credential input
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[validate(email(message = "Correo electrónico inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "Ingresa la contraseña"))]
    pub password: String,
}

/// Flattens `validator` derive output into wire-ready field errors
///
/// Field names are converted to the camelCase wire spelling so clients can
/// attach messages to their form inputs directly.
pub fn collect_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: to_camel_case(field),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Dato inválido".to_string()),
            })
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn is_digit_string(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

impl TicketInput {
    /// Validates and normalizes the input into a persistence-ready value
    ///
    /// Fields are whitespace-trimmed before the rules run. Any supplied
    /// `estado` is dropped here: `CreateTicket` has no status field.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message; no side effects.
    pub fn validated(&self) -> Result<CreateTicket, Vec<FieldError>> {
        let normalized = Self {
            cedula: self.cedula.trim().to_string(),
            nombre_completo: self.nombre_completo.trim().to_string(),
            correo: self.correo.trim().to_string(),
            celular: self.celular.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
            estado: None,
        };

        let mut errors = match normalized.validate() {
            Ok(()) => Vec::new(),
            Err(e) => collect_errors(&e),
        };

        if !is_digit_string(&normalized.cedula) {
            errors.push(FieldError::new(
                "cedula",
                "La cédula solo debe contener números",
            ));
        }
        if !is_digit_string(&normalized.celular) {
            errors.push(FieldError::new(
                "celular",
                "El número de celular solo debe contener números",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateTicket {
            cedula: normalized.cedula,
            nombre_completo: normalized.nombre_completo,
            correo: normalized.correo,
            celular: normalized.celular,
            descripcion: normalized.descripcion,
        })
    }
}

impl TicketPatch {
    /// Validates and normalizes the patch into a partial-update value
    ///
    /// Only present fields are checked; an all-None patch is valid and
    /// becomes an `UpdateTicket` that merely bumps `updated_at`.
    pub fn validated(&self) -> Result<UpdateTicket, Vec<FieldError>> {
        let trim = |value: &Option<String>| value.as_ref().map(|v| v.trim().to_string());

        let normalized = Self {
            cedula: trim(&self.cedula),
            nombre_completo: trim(&self.nombre_completo),
            correo: trim(&self.correo),
            celular: trim(&self.celular),
            descripcion: trim(&self.descripcion),
            estado: self.estado,
        };

        let mut errors = match normalized.validate() {
            Ok(()) => Vec::new(),
            Err(e) => collect_errors(&e),
        };

        if let Some(cedula) = &normalized.cedula {
            if !is_digit_string(cedula) {
                errors.push(FieldError::new(
                    "cedula",
                    "La cédula solo debe contener números",
                ));
            }
        }
        if let Some(celular) = &normalized.celular {
            if !is_digit_string(celular) {
                errors.push(FieldError::new(
                    "celular",
                    "El número de celular solo debe contener números",
                ));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UpdateTicket {
            cedula: normalized.cedula,
            nombre_completo: normalized.nombre_completo,
            correo: normalized.correo,
            celular: normalized.celular,
            descripcion: normalized.descripcion,
            estado: normalized.estado,
        })
    }
}
