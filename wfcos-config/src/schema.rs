//! Configuration structures for WFCOS training runs
//!
//! Field names follow the source document. Every structure is immutable
//! once produced by the loader; the `Default` impls describe the reference
//! COCO ResNet-101 run and are used by tests and by `wfcos init`.

use serde::{Deserialize, Serialize};
use wfcos_core::{BackboneStyle, LogLevelKind, ModelKind, OptimizerKind};

/// Complete configuration for a training/evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WfcosConfig {
    /// Model architecture configuration
    pub model: ModelConfig,
    /// Optimizer configuration
    pub optimizer: OptimizerConfig,
    /// Learning-rate schedule configuration
    pub lr_config: LrScheduleConfig,
    /// Dataset configuration
    pub data: DataConfig,
    /// Run bookkeeping
    pub run: RunConfig,
}

/// Model architecture: family tag plus backbone, neck, head and losses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Detector family
    pub model_type: ModelKind,
    /// Feature-extraction backbone
    pub backbone: BackboneConfig,
    /// Feature pyramid neck
    pub neck: NeckConfig,
    /// Prediction head
    pub head: HeadConfig,
    /// Loss terms
    pub loss: LossConfig,
}

/// ResNet backbone configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackboneConfig {
    /// Pretrained weights identifier (path or model-zoo address)
    pub pretrained: String,
    /// Network depth (18, 34, 50, 101 or 152)
    pub depth: u32,
    /// Number of residual stages
    pub num_stages: u32,
    /// Stages whose feature maps are fed to the neck, each < num_stages
    pub out_indices: Vec<u32>,
    /// Stages with frozen weights; -1 freezes nothing
    pub frozen_stages: i32,
    /// Normalization layer settings
    pub norm_cfg: NormConfig,
    /// Weight-layout convention
    pub style: BackboneStyle,
}

/// Normalization layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormConfig {
    /// Normalization layer type tag (e.g. "BN", "GN")
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Whether the normalization parameters are trainable
    pub requires_grad: bool,
}

/// Feature pyramid (FPN) neck configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeckConfig {
    /// Input channel count per pyramid level, one per backbone out index
    pub in_channels: Vec<u32>,
    /// Output channel count of every pyramid level
    pub out_channels: u32,
    /// First backbone level used by the pyramid
    pub start_level: u32,
    /// Add extra convolution levels on top of the pyramid
    pub add_extra_convs: bool,
    /// Place the extra convolutions on the inputs rather than the outputs
    pub extra_convs_on_inputs: bool,
    /// Number of output tensors
    pub num_outs: u32,
    /// Insert a ReLU before the extra convolutions
    pub relu_before_extra_convs: bool,
}

/// Prediction head configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadConfig {
    /// Number of classes, including the background class
    pub num_classes: u32,
    /// Input channels; must equal the neck's out_channels
    pub in_channels: u32,
    /// Number of quantized energy levels in the energy map
    pub max_energy: u32,
    /// Number of stacked convolutions
    pub stacked_convs: u32,
    /// Channels in the stacked convolutions
    pub feat_channels: u32,
    /// Stride of each head, one per neck output
    pub strides: Vec<u32>,
    /// Split the classification and energy convolution stacks
    pub split_convs: bool,
}

/// Loss term configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossConfig {
    /// Classification loss
    pub classifier: ClassifierLossConfig,
    /// Bounding-box regression loss
    pub bbox: BboxLossConfig,
    /// Energy-map loss
    pub energy: EnergyLossConfig,
}

/// Focal classification loss settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierLossConfig {
    /// Use sigmoidal focal loss
    pub use_sigmoid: bool,
    /// Focusing exponent
    pub gamma: f64,
    /// Class-balance weight
    pub alpha: f64,
    /// Weight of this term in the total loss
    pub loss_weight: f64,
}

/// Bounding-box loss settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BboxLossConfig {
    /// Weight of this term in the total loss
    pub loss_weight: f64,
}

/// Energy-map loss settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyLossConfig {
    /// Use sigmoidal cross entropy
    pub use_sigmoid: bool,
    /// Weight of this term in the total loss
    pub loss_weight: f64,
}

/// Optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Optimization algorithm
    #[serde(rename = "type")]
    pub kind: OptimizerKind,
    /// Base learning rate
    pub lr: f64,
    /// Weight decay
    pub weight_decay: f64,
    /// SGD momentum; required when kind is SGD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<f64>,
    /// Adam epsilon; only valid when kind is Adam
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    /// Per-parameter-group multiplier overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paramwise_options: Option<ParamwiseOptions>,
}

/// Named multipliers applied to specific parameter groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamwiseOptions {
    /// Learning-rate multiplier for bias parameters
    pub bias_lr_mult: f64,
    /// Weight-decay multiplier for bias parameters
    pub bias_decay_mult: f64,
}

/// Learning-rate schedule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LrScheduleConfig {
    /// Number of warmup iterations
    pub warmup_iters: u32,
    /// Starting fraction of the base learning rate, in (0, 1]. The source
    /// document may carry this as an arithmetic expression string.
    pub warmup_ratio: f64,
    /// Epoch milestones at which the learning rate is decayed
    pub step: Vec<u32>,
}

/// Dataset configuration (COCO-format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Dataset root directory
    pub data_root: String,
    /// Images per device per iteration
    pub imgs_per_gpu: u32,
    /// Training split
    pub train: SplitConfig,
    /// Validation split
    pub val: SplitConfig,
    /// Test split
    pub test: SplitConfig,
}

/// One dataset split: annotation file plus image directory, both relative
/// to data_root unless absolute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Annotation file path
    pub ann_file: String,
    /// Image directory path
    pub img_prefix: String,
}

/// Run bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory for logs and run artifacts
    pub work_dir: String,
    /// Directory for checkpoint files
    pub checkpoint: String,
    /// Total number of training epochs
    pub total_epochs: u32,
    /// Number of devices to train on
    pub num_gpus: u32,
    /// Resume from the latest checkpoint
    pub resume: bool,
    /// Logging verbosity requested for the run
    pub log_level: LogLevelKind,
}

impl Default for WfcosConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            optimizer: OptimizerConfig::default(),
            lr_config: LrScheduleConfig::default(),
            data: DataConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_type: ModelKind::Wfcos,
            backbone: BackboneConfig::default(),
            neck: NeckConfig::default(),
            head: HeadConfig::default(),
            loss: LossConfig::default(),
        }
    }
}

impl Default for BackboneConfig {
    fn default() -> Self {
        Self {
            pretrained: "open-mmlab://resnet101_caffe".to_string(),
            depth: 101,
            num_stages: 4,
            out_indices: vec![0, 1, 2, 3],
            frozen_stages: 1,
            norm_cfg: NormConfig { type_tag: "BN".to_string(), requires_grad: false },
            style: BackboneStyle::Caffe,
        }
    }
}

impl Default for NeckConfig {
    fn default() -> Self {
        Self {
            in_channels: vec![256, 512, 1024, 2048],
            out_channels: 256,
            start_level: 1,
            add_extra_convs: true,
            extra_convs_on_inputs: false,
            num_outs: 5,
            relu_before_extra_convs: false,
        }
    }
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            num_classes: 81,
            in_channels: 256,
            max_energy: 128,
            stacked_convs: 4,
            feat_channels: 256,
            strides: vec![8, 16, 32, 64, 128],
            split_convs: false,
        }
    }
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierLossConfig {
                use_sigmoid: true,
                gamma: 2.0,
                alpha: 0.25,
                loss_weight: 1.0,
            },
            bbox: BboxLossConfig { loss_weight: 1.0 },
            energy: EnergyLossConfig { use_sigmoid: true, loss_weight: 1.0 },
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            kind: OptimizerKind::Sgd,
            lr: 0.01,
            weight_decay: 0.0001,
            momentum: Some(0.9),
            eps: None,
            paramwise_options: Some(ParamwiseOptions {
                bias_lr_mult: 2.0,
                bias_decay_mult: 0.0,
            }),
        }
    }
}

impl Default for LrScheduleConfig {
    fn default() -> Self {
        Self {
            warmup_iters: 500,
            warmup_ratio: 1.0 / 3.0,
            step: vec![1],
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_root: "data/coco".to_string(),
            imgs_per_gpu: 4,
            train: SplitConfig {
                ann_file: "annotations/instances_train2017.json".to_string(),
                img_prefix: "train2017".to_string(),
            },
            val: SplitConfig {
                ann_file: "annotations/instances_val2017.json".to_string(),
                img_prefix: "val2017".to_string(),
            },
            test: SplitConfig {
                ann_file: "annotations/instances_val2017.json".to_string(),
                img_prefix: "val2017".to_string(),
            },
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            work_dir: "work_dirs/wfcos_r101".to_string(),
            checkpoint: "work_dirs/wfcos_r101/checkpoints".to_string(),
            total_epochs: 1,
            num_gpus: 1,
            resume: false,
            log_level: LogLevelKind::Info,
        }
    }
}
