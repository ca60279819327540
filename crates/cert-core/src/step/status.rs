/// Estado de persistencia de un paso reconstruido desde el log de eventos.
///
/// Transiciones observadas:
/// - `Pending` -> `Saving`
/// - `Saving` -> `Saved` | `Failed`
/// - `Failed` -> `Saving` (reintento del usuario)
/// - `Saved` -> `Saving` (reenvío tras volver atrás)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Sin guardar todavía.
    Pending,
    /// Envío en curso.
    Saving,
    /// Guardado en el almacén local.
    Saved,
    /// El último envío falló.
    Failed,
}
