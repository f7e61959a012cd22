use std::path::PathBuf;

/// Parameter names the solver writes plots for, in output order.
pub const DEFAULT_PARAMS: [&str; 3] = ["conc", "temp", "pressure"];

/// Number of gas variants in the default pipeline configuration.
pub const DEFAULT_GAS_COUNT: u32 = 2;

/// Root of the solver output tree, relative to the working directory.
pub const DEFAULT_BASE: &str = "build/out";

/// Which pic directories a run covers: the base output path, the
/// parameter list, and how many gases the pipeline was configured with.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub base: PathBuf,
    pub params: Vec<String>,
    pub gas_count: u32,
}

/// One `<base>/gas<N>/<param>/pic` directory.
#[derive(Debug, Clone)]
pub struct TargetDir {
    pub param: String,
    pub gas: u32,
    pub path: PathBuf,
}

impl TargetDir {
    /// Short form for display and grouping, without the base prefix.
    pub fn label(&self) -> String {
        format!("gas{}/{}/pic", self.gas, self.param)
    }
}

impl CleanConfig {
    /// All target directories, parameter-major: for each parameter in
    /// listed order, gas indices ascend from 0.
    pub fn target_dirs(&self) -> Vec<TargetDir> {
        let mut targets = Vec::with_capacity(self.params.len() * self.gas_count as usize);
        for param in &self.params {
            for gas in 0..self.gas_count {
                let path = self
                    .base
                    .join(format!("gas{}", gas))
                    .join(param)
                    .join("pic");
                targets.push(TargetDir {
                    param: param.clone(),
                    gas,
                    path,
                });
            }
        }
        targets
    }
}
