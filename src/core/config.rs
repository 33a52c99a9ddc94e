use std::fmt;

#[derive(Debug, Clone)]
pub enum PageSize {
    A4,
    A5,
    /// Bobina térmica: largura fixa, altura livre (mm).
    Thermal(f32),
    Custom(f32, f32), // width, height in mm
}

impl PageSize {
    /// Argumentos de `#set page(...)` para o tamanho. Papéis padrão usam
    /// `paper:`; os demais declaram largura e altura.
    pub fn to_typst(&self) -> String {
        match self {
            PageSize::A4 => "paper: \"a4\"".to_string(),
            PageSize::A5 => "paper: \"a5\"".to_string(),
            PageSize::Thermal(w) => format!("width: {}mm, height: auto", w),
            PageSize::Custom(w, h) => format!("width: {}mm, height: {}mm", w, h),
        }
    }

    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Thermal(w) => (*w, 0.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 15.0,
            bottom: 15.0,
            left: 15.0,
            right: 15.0,
        }
    }
}

impl Margin {
    pub fn uniform(size: f32) -> Self {
        Margin {
            top: size,
            bottom: size,
            left: size,
            right: size,
        }
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    pub fn to_typst(&self) -> String {
        format!(
            "(top: {}mm, bottom: {}mm, left: {}mm, right: {}mm)",
            self.top, self.bottom, self.left, self.right
        )
    }
}

/// Configuração de página usada por todos os documentos Typst gerados.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin: Margin,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: Margin::default(),
            font_family: "DejaVu Sans Mono".to_string(),
            font_size: 11.0,
        }
    }
}

impl PdfConfig {
    /// Layout do formulário de recibo pré-impresso: A4 paisagem, margem zero,
    /// fonte monoespaçada para alinhar valores nas coordenadas do papel.
    pub fn receipt_form() -> Self {
        PdfConfig {
            page_size: PageSize::A4,
            orientation: Orientation::Landscape,
            margin: Margin::zero(),
            font_family: "DejaVu Sans Mono".to_string(),
            font_size: 11.0,
        }
    }

    pub fn thermal() -> Self {
        PdfConfig {
            page_size: PageSize::Thermal(80.0),
            orientation: Orientation::Portrait,
            margin: Margin::uniform(4.0),
            font_family: "DejaVu Sans Mono".to_string(),
            font_size: 8.0,
        }
    }

    pub fn to_typst_header(&self) -> String {
        format!(
            r#"#set page(
  {},
  margin: {},
  flipped: {}
)
#set text(
  font: "{}",
  size: {}pt
)"#,
            self.page_size.to_typst(),
            self.margin.to_typst(),
            matches!(self.orientation, Orientation::Landscape),
            self.font_family,
            self.font_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_form_is_landscape_with_zero_margin() {
        let cfg = PdfConfig::receipt_form();
        let header = cfg.to_typst_header();
        assert!(header.contains("flipped: true"));
        assert!(header.contains("top: 0mm"));
        assert!(header.contains("\"a4\""));
    }

    #[test]
    fn thermal_page_has_auto_height() {
        let cfg = PdfConfig::thermal();
        assert!(cfg.to_typst_header().contains("width: 80mm, height: auto"));
    }
}
