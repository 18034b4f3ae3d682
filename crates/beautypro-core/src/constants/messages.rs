// ABOUTME: Client-facing response messages returned in error details and acknowledgements
// ABOUTME: Portuguese strings reproduced exactly for compatibility with existing clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

/// Register with an email already on file
pub const EMAIL_ALREADY_REGISTERED: &str = "Email já cadastrado";
/// Login with unknown email or wrong password
pub const INVALID_CREDENTIALS: &str = "Email ou senha incorretos";
/// Bearer token malformed, expired, or badly signed
pub const INVALID_TOKEN: &str = "Token inválido";
/// Bearer token refers to a user that no longer exists
pub const USER_NOT_FOUND: &str = "Usuário não encontrado";
/// Protected route called without credentials
pub const NOT_AUTHENTICATED: &str = "Não autenticado";

/// Unknown professional on the public surface
pub const PROFESSIONAL_NOT_FOUND: &str = "Profissional não encontrado";
/// Unknown or foreign catalog service
pub const SERVICE_NOT_FOUND: &str = "Serviço não encontrado";
/// Unknown or foreign appointment
pub const APPOINTMENT_NOT_FOUND: &str = "Agendamento não encontrado";

/// Service deleted
pub const SERVICE_DELETED: &str = "Serviço excluído com sucesso";
/// Public appointment request accepted
pub const APPOINTMENT_REQUESTED: &str =
    "Agendamento solicitado com sucesso! Aguarde a confirmação do profissional.";
/// Reschedule proposal stored
pub const RESCHEDULE_PROPOSED: &str = "Proposta de reagendamento enviada";

/// Health check message
pub const API_RUNNING: &str = "BeautyPro API is running";

/// Acknowledgement for a status change, e.g. "Agendamento confirmed com sucesso"
#[must_use]
pub fn appointment_status_updated(status: &str) -> String {
    format!("Agendamento {status} com sucesso")
}
