//! Shader stage detection from request names
//!
//! The external compiler chooses the stage from the request file's
//! extension and ignores files it cannot classify.

use std::path::Path;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEvaluation,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
    ];

    /// File extension the compiler associates with this stage
    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::TessControl => "tesc",
            ShaderStage::TessEvaluation => "tese",
            ShaderStage::Geometry => "geom",
            ShaderStage::Fragment => "frag",
            ShaderStage::Compute => "comp",
        }
    }

    /// Stage of a request name, `None` if the compiler would not recognize it
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?;
        Self::ALL.into_iter().find(|stage| stage.extension() == extension)
    }

    /// Name without its stage extension
    ///
    /// Requests sharing a program name (`water.vert`, `water.frag`) are
    /// linked by the compiler into one program.
    pub fn program_name(name: &str) -> &str {
        match Self::from_name(name) {
            Some(stage) => &name[..name.len() - stage.extension().len() - 1],
            None => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_extension_is_recognized() {
        for stage in ShaderStage::ALL {
            let name = format!("shader.{}", stage.extension());
            assert_eq!(ShaderStage::from_name(&name), Some(stage));
        }
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(ShaderStage::from_name("shader.glsl"), None);
        assert_eq!(ShaderStage::from_name("shader"), None);
        assert_eq!(ShaderStage::from_name(".frag"), None);
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(ShaderStage::from_name("water.frag.bak"), None);
        assert_eq!(ShaderStage::from_name("water.v2.frag"), Some(ShaderStage::Fragment));
    }

    #[test]
    fn test_program_name() {
        assert_eq!(ShaderStage::program_name("water.vert"), "water");
        assert_eq!(ShaderStage::program_name("water.v2.frag"), "water.v2");
        assert_eq!(ShaderStage::program_name("water.glsl"), "water.glsl");
    }
}
