//! Fixed user-facing strings.
//!
//! The assistant speaks Spanish; every failure path appends one of these
//! verbatim so the UI never has to interpret an error.

/// Greeting that seeds every fresh or cleared transcript.
pub const SEED_GREETING: &str = "¡Hola! 👋 Soy PlantCare AI, tu asistente personal de plantas.\n\n¿Cómo puedo ayudarte hoy?\n\n💬 Hazme cualquier pregunta sobre plantas\n📸 O envía una foto para análisis completo";

/// Caption used for image turns sent without any text.
pub const IMAGE_CAPTION_PLACEHOLDER: &str = "Sin descripción";

/// Chat turn answered with `success = false` or a non-success HTTP status.
pub const CHAT_SERVICE_FAILURE: &str = "❌ Error al procesar tu mensaje. Intenta de nuevo.";

/// Chat turn that never obtained a response.
pub const CHAT_TRANSPORT_FAILURE: &str = "❌ No se pudo conectar con el servidor.";

/// Analysis turn answered with `success = false`.
pub const ANALYSIS_SERVICE_FAILURE: &str =
    "❌ No se pudo analizar la imagen. Por favor, intenta de nuevo.";

/// Analysis endpoint answered 503.
pub const ANALYSIS_UNAVAILABLE: &str =
    "❌ El análisis de imágenes no está disponible en este momento. Intenta usar el chat.";

/// Analysis turn that never obtained a response.
pub const ANALYSIS_TRANSPORT_FAILURE: &str =
    "❌ Error al conectar con el servidor. Verifica tu conexión.";

/// Fallback for the standalone analysis flow when the service gives no reason.
pub const ANALYSIS_GENERIC_FAILURE: &str = "No se pudo analizar la planta";

/// Identification fallback when the service could not name the plant.
pub const UNIDENTIFIED_PLANT: &str = "No identificada";
