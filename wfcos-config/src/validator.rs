//! Cross-field configuration validation
//!
//! Runs the six cross-field invariants in a fixed order; the first violation
//! is returned as an [`ConfigError::InvariantViolation`] carrying the
//! invariant number and the conflicting values. Per-field range and enum
//! constraints are the loader's concern, not this module's.

use wfcos_core::{ConfigError, Result};

use crate::schema::WfcosConfig;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the cross-field invariants of a configuration.
    pub fn validate(config: &WfcosConfig) -> Result<()> {
        Self::check_pyramid_lengths(config)?;
        Self::check_head_channels(config)?;
        Self::check_step_milestones(config)?;
        Self::check_warmup_ratio(config)?;
        Self::check_paths(config)?;
        Self::check_loss_and_lr(config)?;
        Ok(())
    }

    /// Invariant 1: backbone out indices, neck input channels and head
    /// strides describe the same pyramid.
    fn check_pyramid_lengths(config: &WfcosConfig) -> Result<()> {
        let out_indices = config.model.backbone.out_indices.len();
        let in_channels = config.model.neck.in_channels.len();
        if out_indices != in_channels {
            return Err(ConfigError::invariant(
                1,
                format!(
                    "backbone.out_indices has {out_indices} entries but neck.in_channels has {in_channels}"
                ),
            ));
        }

        let strides = config.model.head.strides.len();
        let num_outs = config.model.neck.num_outs as usize;
        if strides != num_outs {
            return Err(ConfigError::invariant(
                1,
                format!("head.strides has {strides} entries but neck.num_outs is {num_outs}"),
            ));
        }

        Ok(())
    }

    /// Invariant 2: the head consumes exactly what the neck produces.
    fn check_head_channels(config: &WfcosConfig) -> Result<()> {
        let head = config.model.head.in_channels;
        let neck = config.model.neck.out_channels;
        if head != neck {
            return Err(ConfigError::invariant(
                2,
                format!("head.in_channels ({head}) != neck.out_channels ({neck})"),
            ));
        }
        Ok(())
    }

    /// Invariant 3: decay milestones form a strictly increasing sequence of
    /// epochs within the run.
    fn check_step_milestones(config: &WfcosConfig) -> Result<()> {
        let step = &config.lr_config.step;
        if step.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::invariant(
                3,
                format!("lr_config.step {step:?} is not strictly increasing"),
            ));
        }

        let total_epochs = config.run.total_epochs;
        if let Some(&last) = step.last() {
            if last > total_epochs {
                return Err(ConfigError::invariant(
                    3,
                    format!(
                        "lr_config.step milestone {last} exceeds total_epochs ({total_epochs})"
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Invariant 4: the evaluated warmup ratio lies in (0, 1].
    fn check_warmup_ratio(config: &WfcosConfig) -> Result<()> {
        let ratio = config.lr_config.warmup_ratio;
        if ratio <= 0.0 || ratio > 1.0 {
            return Err(ConfigError::invariant(
                4,
                format!("lr_config.warmup_ratio ({ratio}) is outside (0, 1]"),
            ));
        }
        Ok(())
    }

    /// Invariant 5: referenced paths are syntactically well-formed.
    /// Existence is checked lazily by the data pipeline, never here.
    fn check_paths(config: &WfcosConfig) -> Result<()> {
        let paths = [
            ("data.data_root", &config.data.data_root),
            ("data.train.ann_file", &config.data.train.ann_file),
            ("data.train.img_prefix", &config.data.train.img_prefix),
            ("data.val.ann_file", &config.data.val.ann_file),
            ("data.val.img_prefix", &config.data.val.img_prefix),
            ("data.test.ann_file", &config.data.test.ann_file),
            ("data.test.img_prefix", &config.data.test.img_prefix),
            ("work_dir", &config.run.work_dir),
            ("checkpoint", &config.run.checkpoint),
        ];

        for (name, path) in paths {
            if path.is_empty() {
                return Err(ConfigError::invariant(5, format!("path `{name}` is empty")));
            }
            if path.contains('\0') {
                return Err(ConfigError::invariant(
                    5,
                    format!("path `{name}` contains a NUL byte"),
                ));
            }
        }

        Ok(())
    }

    /// Invariant 6: loss weights are non-negative, the learning rate is
    /// positive, alpha lies in [0, 1] and gamma is non-negative.
    fn check_loss_and_lr(config: &WfcosConfig) -> Result<()> {
        let lr = config.optimizer.lr;
        if lr <= 0.0 {
            return Err(ConfigError::invariant(
                6,
                format!("optimizer.lr ({lr}) must be positive"),
            ));
        }

        let loss = &config.model.loss;
        let weights = [
            ("loss.classifier.loss_weight", loss.classifier.loss_weight),
            ("loss.bbox.loss_weight", loss.bbox.loss_weight),
            ("loss.energy.loss_weight", loss.energy.loss_weight),
        ];
        for (name, weight) in weights {
            if weight < 0.0 {
                return Err(ConfigError::invariant(
                    6,
                    format!("`{name}` ({weight}) must be non-negative"),
                ));
            }
        }

        let alpha = loss.classifier.alpha;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ConfigError::invariant(
                6,
                format!("loss.classifier.alpha ({alpha}) is outside [0, 1]"),
            ));
        }

        let gamma = loss.classifier.gamma;
        if gamma < 0.0 {
            return Err(ConfigError::invariant(
                6,
                format!("loss.classifier.gamma ({gamma}) must be non-negative"),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invariant_number(result: Result<()>) -> u8 {
        match result.unwrap_err() {
            ConfigError::InvariantViolation { invariant, .. } => invariant,
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_default_config() {
        let config = WfcosConfig::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_pyramid_length_mismatch() {
        let mut config = WfcosConfig::default();
        config.model.neck.in_channels.pop();

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 1);
    }

    #[test]
    fn test_stride_count_mismatch() {
        let mut config = WfcosConfig::default();
        config.model.head.strides.push(256);

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 1);
    }

    #[test]
    fn test_head_neck_channel_mismatch() {
        let mut config = WfcosConfig::default();
        config.model.head.in_channels = 512;

        let err = ConfigValidator::validate(&config).unwrap_err();
        match err {
            ConfigError::InvariantViolation { invariant, message } => {
                assert_eq!(invariant, 2);
                assert!(message.contains("512"));
                assert!(message.contains("256"));
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_step_not_strictly_increasing() {
        let mut config = WfcosConfig::default();
        config.run.total_epochs = 12;
        config.lr_config.step = vec![8, 8, 11];

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 3);
    }

    #[test]
    fn test_step_beyond_total_epochs() {
        let mut config = WfcosConfig::default();
        config.run.total_epochs = 12;
        config.lr_config.step = vec![8, 16];

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 3);
    }

    #[test]
    fn test_empty_step_is_allowed() {
        let mut config = WfcosConfig::default();
        config.lr_config.step = Vec::new();

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_warmup_ratio_out_of_range() {
        let mut config = WfcosConfig::default();
        config.lr_config.warmup_ratio = 0.0;
        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 4);

        config.lr_config.warmup_ratio = 1.5;
        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 4);
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut config = WfcosConfig::default();
        config.data.data_root = String::new();

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 5);
    }

    #[test]
    fn test_nul_byte_in_path_rejected() {
        let mut config = WfcosConfig::default();
        config.run.work_dir = "work\0dir".to_string();

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 5);
    }

    #[test]
    fn test_non_positive_learning_rate() {
        let mut config = WfcosConfig::default();
        config.optimizer.lr = 0.0;

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 6);
    }

    #[test]
    fn test_negative_loss_weight() {
        let mut config = WfcosConfig::default();
        config.model.loss.bbox.loss_weight = -0.5;

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 6);
    }

    #[test]
    fn test_alpha_and_gamma_bounds() {
        let mut config = WfcosConfig::default();
        config.model.loss.classifier.alpha = 1.5;
        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 6);

        let mut config = WfcosConfig::default();
        config.model.loss.classifier.gamma = -1.0;
        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 6);
    }

    #[test]
    fn test_invariant_order_is_fixed() {
        // Violates both invariants 2 and 4; invariant 2 must be reported.
        let mut config = WfcosConfig::default();
        config.model.head.in_channels = 512;
        config.lr_config.warmup_ratio = 2.0;

        assert_eq!(invariant_number(ConfigValidator::validate(&config)), 2);
    }
}
