use std::collections::HashMap;

use agro_types::{FieldError, StatusView};

use crate::domain::models::Language;

#[cfg(test)]
#[path = "i18n_test.rs"]
mod tests;

const ES: &[(&str, &str)] = &[
    ("app.name", "Agro Asesor"),
    ("page.loading", "Cargando..."),
    ("page.checking_session", "Verificando sesión..."),
    ("page.action_in_progress", "Procesando, espera un momento..."),
    ("page.error", "Error"),
    ("page.back", "Volver a"),
    ("page.login", "Iniciar sesión"),
    ("page.register", "Crear cuenta"),
    ("page.password", "Contraseña"),
    ("page.home", "Inicio"),
    ("page.clients", "Clientes"),
    ("page.projects", "Planes de cultivo"),
    ("page.project_detail", "Detalle del plan"),
    ("page.requests", "Solicitudes"),
    ("page.workshop_catalog", "Catálogo de talleres"),
    ("page.workshop_history", "Mis talleres"),
    ("page.workshop_admin", "Administrar talleres"),
    ("page.profile", "Perfil"),
    ("page.notifications", "Notificaciones"),
    ("error.generic", "Ocurrió un error. Intenta de nuevo."),
    ("error.connection", "No se pudo conectar con el servidor."),
    ("error.not_found", "No se encontró el registro solicitado."),
    ("error.storage", "No se pudo guardar la información localmente."),
    ("session.expired", "Tu sesión expiró. Inicia sesión de nuevo."),
    ("session.logged_out", "Sesión cerrada."),
    ("validation.required", "Este campo es obligatorio."),
    ("validation.email", "Ingresa un correo válido."),
    ("validation.phone", "Ingresa un teléfono válido (7 a 15 dígitos)."),
    ("validation.date", "Usa el formato AAAA-MM-DD."),
    ("validation.amount", "Ingresa un monto válido."),
    ("validation.password_length", "La contraseña debe tener al menos 8 caracteres."),
    ("validation.password_mismatch", "Las contraseñas no coinciden."),
    ("validation.select_workshop", "Selecciona al menos un taller."),
    ("field.correo", "Correo"),
    ("field.contrasena", "Contraseña"),
    ("field.confirmacion", "Confirmación"),
    ("field.nombre", "Nombre"),
    ("field.telefono", "Teléfono"),
    ("field.titulo", "Título"),
    ("field.fecha_vencimiento", "Fecha de vencimiento"),
    ("field.plaga", "Plaga"),
    ("field.talleres", "Talleres"),
    ("field.fecha", "Fecha"),
    ("field.costo", "Costo"),
    ("field.comprobante", "Comprobante"),
    ("status.unknown", "Desconocido"),
    ("status.request.pending", "Pendiente"),
    ("status.request.accepted", "Aceptada"),
    ("status.request.rejected", "Rechazada"),
    ("status.request.in_review", "En revisión"),
    ("status.request.completed", "Finalizada"),
    ("status.workshop.upcoming", "Próximo"),
    ("status.workshop.in_progress", "En curso"),
    ("status.workshop.completed", "Finalizado"),
    ("status.workshop.rejected", "Rechazado"),
    ("status.workshop.in_review", "En revisión"),
    ("status.workshop.overdue", "Vencido"),
    ("status.task.pending", "Pendiente"),
    ("status.task.completed", "Completada"),
    ("status.task.overdue", "Vencida"),
    ("action.accept", "Aceptar"),
    ("action.reject", "Rechazar"),
    ("action.validate_payment", "Validar pago"),
    ("request.kind.advisory", "Asesoría"),
    ("request.kind.workshop", "Taller"),
    ("home.greeting", "Hola, {name}"),
    ("home.unread", "{count} sin leer"),
    ("home.menu", "Menú"),
    ("password.recover_intro", "Ingresa tu correo para recuperar tu contraseña."),
    ("password.change_intro", "Escribe tu nueva contraseña dos veces."),
    ("password.recovery_sent", "Si el correo está registrado, recibirás instrucciones."),
    ("password.updated", "Contraseña actualizada."),
    ("clients.empty", "No hay clientes registrados."),
    ("clients.search", "Búsqueda"),
    ("clients.updated", "Cliente actualizado."),
    ("clients.deleted", "Cliente eliminado."),
    ("clients.location", "Ubicación"),
    ("projects.empty", "No hay planes de cultivo."),
    ("projects.filter", "Cultivo"),
    ("projects.all", "Todos"),
    ("projects.owner", "Cliente"),
    ("project.crops", "Cultivos"),
    ("project.soil", "Terreno"),
    ("project.hectares", "Hectáreas"),
    ("project.start", "Inicio"),
    ("project.tasks", "Tareas"),
    ("project.no_tasks", "Sin tareas."),
    ("project.pests", "Reportes de plaga"),
    ("project.no_pests", "Sin reportes de plaga."),
    ("project.performance", "Desempeño"),
    ("project.completion", "Avance"),
    ("project.expected_yield", "Rendimiento estimado"),
    ("project.actual_yield", "Rendimiento real"),
    ("project.due", "vence"),
    ("project.editor_new", "Nueva tarea"),
    ("project.editor_edit", "Editar tarea"),
    ("project.task_created", "Tarea creada."),
    ("project.task_updated", "Tarea actualizada."),
    ("project.task_deleted", "Tarea eliminada."),
    ("project.pest_reported", "Reporte de plaga enviado."),
    ("project.not_found", "El plan de cultivo no existe."),
    ("requests.tab.all", "Todas"),
    ("requests.tab.advisory", "Asesorías"),
    ("requests.tab.workshop", "Talleres"),
    ("requests.empty", "No hay solicitudes."),
    ("requests.updated", "Solicitud actualizada."),
    ("requests.action_unavailable", "Esta acción no está disponible para la solicitud."),
    ("requests.payment_proof", "Comprobante"),
    ("workshops.empty", "No hay talleres."),
    ("workshops.selected", "seleccionado"),
    ("workshops.requested", "Solicitud de inscripción enviada."),
    ("workshops.not_open", "El taller no admite inscripciones."),
    ("workshops.cost", "Costo"),
    ("workshops.free", "Sin costo"),
    ("workshops.capacity", "Cupo"),
    ("workshops.created", "Taller creado."),
    ("workshops.updated", "Taller actualizado."),
    ("workshops.deleted", "Taller eliminado."),
    ("workshops.proof_sent", "Comprobante enviado. El agrónomo validará tu pago."),
    ("workshops.awaiting_payment", "Pendiente de pago"),
    ("workshops.no_requests", "Aún no has solicitado talleres."),
    ("profile.updated", "Perfil actualizado."),
    ("notifications.empty", "No tienes notificaciones."),
    ("notifications.new", "nueva"),
    ("language.changed", "Idioma actualizado."),
];

const EN: &[(&str, &str)] = &[
    ("app.name", "Agro Advisor"),
    ("page.loading", "Loading..."),
    ("page.checking_session", "Checking session..."),
    ("page.action_in_progress", "Working, please wait..."),
    ("page.error", "Error"),
    ("page.back", "Back to"),
    ("page.login", "Sign in"),
    ("page.register", "Create account"),
    ("page.password", "Password"),
    ("page.home", "Home"),
    ("page.clients", "Clients"),
    ("page.projects", "Cultivation plans"),
    ("page.project_detail", "Plan details"),
    ("page.requests", "Requests"),
    ("page.workshop_catalog", "Workshop catalog"),
    ("page.workshop_history", "My workshops"),
    ("page.workshop_admin", "Manage workshops"),
    ("page.profile", "Profile"),
    ("page.notifications", "Notifications"),
    ("error.generic", "Something went wrong. Please try again."),
    ("error.connection", "Could not reach the server."),
    ("error.not_found", "The requested record was not found."),
    ("error.storage", "Could not save data locally."),
    ("session.expired", "Your session has expired. Please sign in again."),
    ("session.logged_out", "Signed out."),
    ("validation.required", "This field is required."),
    ("validation.email", "Enter a valid email address."),
    ("validation.phone", "Enter a valid phone number (7 to 15 digits)."),
    ("validation.date", "Use the YYYY-MM-DD format."),
    ("validation.amount", "Enter a valid amount."),
    ("validation.password_length", "The password must be at least 8 characters long."),
    ("validation.password_mismatch", "The passwords do not match."),
    ("validation.select_workshop", "Select at least one workshop."),
    ("field.correo", "Email"),
    ("field.contrasena", "Password"),
    ("field.confirmacion", "Confirmation"),
    ("field.nombre", "Name"),
    ("field.telefono", "Phone"),
    ("field.titulo", "Title"),
    ("field.fecha_vencimiento", "Due date"),
    ("field.plaga", "Pest"),
    ("field.talleres", "Workshops"),
    ("field.fecha", "Date"),
    ("field.costo", "Cost"),
    ("field.comprobante", "Payment proof"),
    ("status.unknown", "Unknown"),
    ("status.request.pending", "Pending"),
    ("status.request.accepted", "Accepted"),
    ("status.request.rejected", "Rejected"),
    ("status.request.in_review", "In review"),
    ("status.request.completed", "Completed"),
    ("status.workshop.upcoming", "Upcoming"),
    ("status.workshop.in_progress", "In progress"),
    ("status.workshop.completed", "Completed"),
    ("status.workshop.rejected", "Rejected"),
    ("status.workshop.in_review", "In review"),
    ("status.workshop.overdue", "Overdue"),
    ("status.task.pending", "Pending"),
    ("status.task.completed", "Completed"),
    ("status.task.overdue", "Overdue"),
    ("action.accept", "Accept"),
    ("action.reject", "Reject"),
    ("action.validate_payment", "Validate payment"),
    ("request.kind.advisory", "Advisory"),
    ("request.kind.workshop", "Workshop"),
    ("home.greeting", "Hello, {name}"),
    ("home.unread", "{count} unread"),
    ("home.menu", "Menu"),
    ("password.recover_intro", "Enter your email to recover your password."),
    ("password.change_intro", "Type your new password twice."),
    ("password.recovery_sent", "If the email is registered you will receive instructions."),
    ("password.updated", "Password updated."),
    ("clients.empty", "No clients registered."),
    ("clients.search", "Search"),
    ("clients.updated", "Client updated."),
    ("clients.deleted", "Client deleted."),
    ("clients.location", "Location"),
    ("projects.empty", "No cultivation plans."),
    ("projects.filter", "Crop"),
    ("projects.all", "All"),
    ("projects.owner", "Client"),
    ("project.crops", "Crops"),
    ("project.soil", "Terrain"),
    ("project.hectares", "Hectares"),
    ("project.start", "Start"),
    ("project.tasks", "Tasks"),
    ("project.no_tasks", "No tasks."),
    ("project.pests", "Pest reports"),
    ("project.no_pests", "No pest reports."),
    ("project.performance", "Performance"),
    ("project.completion", "Progress"),
    ("project.expected_yield", "Expected yield"),
    ("project.actual_yield", "Actual yield"),
    ("project.due", "due"),
    ("project.editor_new", "New task"),
    ("project.editor_edit", "Edit task"),
    ("project.task_created", "Task created."),
    ("project.task_updated", "Task updated."),
    ("project.task_deleted", "Task deleted."),
    ("project.pest_reported", "Pest report submitted."),
    ("project.not_found", "The cultivation plan does not exist."),
    ("requests.tab.all", "All"),
    ("requests.tab.advisory", "Advisory"),
    ("requests.tab.workshop", "Workshops"),
    ("requests.empty", "No requests."),
    ("requests.updated", "Request updated."),
    ("requests.action_unavailable", "This action is not available for the request."),
    ("requests.payment_proof", "Payment proof"),
    ("workshops.empty", "No workshops."),
    ("workshops.selected", "selected"),
    ("workshops.requested", "Enrollment request sent."),
    ("workshops.not_open", "This workshop is not open for enrollment."),
    ("workshops.cost", "Cost"),
    ("workshops.free", "Free"),
    ("workshops.capacity", "Seats"),
    ("workshops.created", "Workshop created."),
    ("workshops.updated", "Workshop updated."),
    ("workshops.deleted", "Workshop deleted."),
    ("workshops.proof_sent", "Payment proof sent. The advisor will validate it."),
    ("workshops.awaiting_payment", "Awaiting payment"),
    ("workshops.no_requests", "You have not requested any workshop yet."),
    ("profile.updated", "Profile updated."),
    ("notifications.empty", "You have no notifications."),
    ("notifications.new", "new"),
    ("language.changed", "Language updated."),
];

/// Translation table for one language. Missing keys fall back to Spanish,
/// then to the key itself.
#[derive(Clone, Debug)]
pub struct Translations {
    language: Language,
    entries: HashMap<&'static str, &'static str>,
    fallback: HashMap<&'static str, &'static str>,
}

fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::Es => ES,
        Language::En => EN,
    }
}

impl Translations {
    pub fn new(language: Language) -> Translations {
        return Translations {
            language,
            entries: table(language).iter().copied().collect(),
            fallback: ES.iter().copied().collect(),
        };
    }

    pub fn language(&self) -> Language {
        return self.language;
    }

    pub fn t(&self, key: &str) -> String {
        return self
            .entries
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string());
    }

    /// Translates `key` and fills `{name}` style placeholders.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }

        return text;
    }

    pub fn status(&self, view: StatusView) -> String {
        return self.t(view.label_key);
    }

    /// `Field: message` for an inline validation error.
    pub fn field_error(&self, error: &FieldError) -> String {
        return format!(
            "{}: {}",
            self.t(&format!("field.{}", error.field)),
            self.t(error.message_key)
        );
    }
}
