//! Phong material catalog
//!
//! Materials are a small closed set of named reflectance presets. They are
//! plain `Copy` values, so any number of objects can share one without
//! reference counting.

/// Reflectance coefficients fed to the Phong lighting model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongCoefficients {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl PhongCoefficients {
    const fn new(ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Coefficients packed the way the object uniform block expects them:
    /// ambient, diffuse and specular as vec4 with shininess in specular.w
    pub fn to_uniform(&self) -> [[f32; 4]; 3] {
        [
            [self.ambient[0], self.ambient[1], self.ambient[2], 1.0],
            [self.diffuse[0], self.diffuse[1], self.diffuse[2], 1.0],
            [
                self.specular[0],
                self.specular[1],
                self.specular[2],
                self.shininess,
            ],
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Material {
    #[default]
    Default,
    Chrome,
    Silver,
    Gold,
    Copper,
    Bronze,
    Emerald,
    Ruby,
    Obsidian,
    Pearl,
}

impl Material {
    pub const ALL: [Material; 10] = [
        Material::Default,
        Material::Chrome,
        Material::Silver,
        Material::Gold,
        Material::Copper,
        Material::Bronze,
        Material::Emerald,
        Material::Ruby,
        Material::Obsidian,
        Material::Pearl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Material::Default => "default",
            Material::Chrome => "chrome",
            Material::Silver => "silver",
            Material::Gold => "gold",
            Material::Copper => "copper",
            Material::Bronze => "bronze",
            Material::Emerald => "emerald",
            Material::Ruby => "ruby",
            Material::Obsidian => "obsidian",
            Material::Pearl => "pearl",
        }
    }

    pub fn from_name(name: &str) -> Option<Material> {
        Self::ALL
            .iter()
            .copied()
            .find(|material| material.name().eq_ignore_ascii_case(name))
    }

    // Metal and gem values are the classic OpenGL teapot table, shininess
    // rescaled from [0, 1] to [0, 128].
    pub fn coefficients(&self) -> PhongCoefficients {
        match self {
            Material::Default => {
                PhongCoefficients::new([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.5, 0.5, 0.5], 32.0)
            }
            Material::Chrome => PhongCoefficients::new(
                [0.25, 0.25, 0.25],
                [0.4, 0.4, 0.4],
                [0.774597, 0.774597, 0.774597],
                76.8,
            ),
            Material::Silver => PhongCoefficients::new(
                [0.19225, 0.19225, 0.19225],
                [0.50754, 0.50754, 0.50754],
                [0.508273, 0.508273, 0.508273],
                51.2,
            ),
            Material::Gold => PhongCoefficients::new(
                [0.24725, 0.1995, 0.0745],
                [0.75164, 0.60648, 0.22648],
                [0.628281, 0.555802, 0.366065],
                51.2,
            ),
            Material::Copper => PhongCoefficients::new(
                [0.19125, 0.0735, 0.0225],
                [0.7038, 0.27048, 0.0828],
                [0.256777, 0.137622, 0.086014],
                12.8,
            ),
            Material::Bronze => PhongCoefficients::new(
                [0.2125, 0.1275, 0.054],
                [0.714, 0.4284, 0.18144],
                [0.393548, 0.271906, 0.166721],
                25.6,
            ),
            Material::Emerald => PhongCoefficients::new(
                [0.0215, 0.1745, 0.0215],
                [0.07568, 0.61424, 0.07568],
                [0.633, 0.727811, 0.633],
                76.8,
            ),
            Material::Ruby => PhongCoefficients::new(
                [0.1745, 0.01175, 0.01175],
                [0.61424, 0.04136, 0.04136],
                [0.727811, 0.626959, 0.626959],
                76.8,
            ),
            Material::Obsidian => PhongCoefficients::new(
                [0.05375, 0.05, 0.06625],
                [0.18275, 0.17, 0.22525],
                [0.332741, 0.328634, 0.346435],
                38.4,
            ),
            Material::Pearl => PhongCoefficients::new(
                [0.25, 0.20725, 0.20725],
                [1.0, 0.829, 0.829],
                [0.296648, 0.296648, 0.296648],
                11.264,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for material in Material::ALL {
            assert_eq!(Material::from_name(material.name()), Some(material));
        }
        assert_eq!(Material::from_name("CHROME"), Some(Material::Chrome));
        assert_eq!(Material::from_name("unobtainium"), None);
    }

    #[test]
    fn shininess_is_packed_into_specular_w() {
        let packed = Material::Chrome.coefficients().to_uniform();
        assert_eq!(packed[2][3], 76.8);
        assert_eq!(packed[0][..3], [0.25, 0.25, 0.25]);
    }

    #[test]
    fn every_preset_has_positive_shininess() {
        for material in Material::ALL {
            assert!(material.coefficients().shininess > 0.0, "{}", material.name());
        }
    }
}
