//! Configuration document loading
//!
//! Maps a JSON configuration document onto the typed structures of
//! [`crate::schema`]. The mapping is strict: unknown keys, missing keys and
//! ill-typed leaves are rejected with errors naming the exact dotted field
//! path, so a typo in a run configuration can never pass silently. Cross-field
//! invariants are checked by [`crate::validator`] before a handle is returned.

use std::path::Path;

use serde_json::Value;
use wfcos_core::{BackboneStyle, ConfigError, LogLevelKind, ModelKind, OptimizerKind, Result};

use crate::expr;
use crate::schema::*;
use crate::validator::ConfigValidator;

type JsonMap = serde_json::Map<String, Value>;

/// Top-level keys accepted in a configuration document. Anything else is an
/// unknown field.
const TOP_LEVEL_KEYS: &[&str] = &[
    "model_type",
    "backbone",
    "neck",
    "head",
    "loss",
    "optimizer",
    "lr_config",
    "data",
    "work_dir",
    "checkpoint",
    "total_epochs",
    "num_gpus",
    "resume",
    "log_level",
];

/// Configuration loader: one-shot `document text -> ValidatedConfig`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a configuration document from its JSON text.
    ///
    /// Pure apart from the parse itself: no file-system or network access,
    /// path fields are kept as strings. Fails fast on the first error.
    pub fn load(text: &str) -> Result<ValidatedConfig> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| ConfigError::type_mismatch("$", "a JSON document", e.to_string()))?;
        let root = object(&root, "$")?;

        check_keys(root, "", TOP_LEVEL_KEYS)?;

        let model = ModelConfig {
            model_type: enum_value(
                require(root, "", "model_type")?,
                "model_type",
                r#"one of "WFCOS", "FCOS""#,
                ModelKind::parse,
            )?,
            backbone: backbone_section(require(root, "", "backbone")?)?,
            neck: neck_section(require(root, "", "neck")?)?,
            head: head_section(require(root, "", "head")?)?,
            loss: loss_section(require(root, "", "loss")?)?,
        };

        let config = WfcosConfig {
            model,
            optimizer: optimizer_section(require(root, "", "optimizer")?)?,
            lr_config: lr_section(require(root, "", "lr_config")?)?,
            data: data_section(require(root, "", "data")?)?,
            run: run_section(root)?,
        };

        tracing::debug!("document mapped onto typed schema, checking invariants");
        ConfigValidator::validate(&config)?;
        tracing::debug!(
            model = %config.model.model_type,
            depth = config.model.backbone.depth,
            epochs = config.run.total_epochs,
            "configuration validated"
        );

        Ok(ValidatedConfig { inner: config })
    }

    /// Load and validate a configuration document from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ValidatedConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e))?;
        Self::load(&text)
    }
}

/// Immutable, validated configuration handle.
///
/// Only constructible through [`ConfigLoader`], so every instance has passed
/// the full invariant check. Exposes one read-only accessor per top-level
/// entity and no access to the raw document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    inner: WfcosConfig,
}

impl ValidatedConfig {
    /// Model architecture configuration
    pub fn model(&self) -> &ModelConfig {
        &self.inner.model
    }

    /// Optimizer configuration
    pub fn optimizer(&self) -> &OptimizerConfig {
        &self.inner.optimizer
    }

    /// Learning-rate schedule configuration
    pub fn lr_schedule(&self) -> &LrScheduleConfig {
        &self.inner.lr_config
    }

    /// Dataset configuration
    pub fn data(&self) -> &DataConfig {
        &self.inner.data
    }

    /// Run bookkeeping
    pub fn run(&self) -> &RunConfig {
        &self.inner.run
    }

    /// Re-serialize to the flat document shape accepted by the loader.
    pub fn to_document(&self) -> Value {
        self.inner.to_document()
    }

    /// Re-serialize to pretty-printed JSON text.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_document())
            .expect("serializing a document tree cannot fail")
    }
}

impl WfcosConfig {
    /// Serialize to the flat document shape accepted by [`ConfigLoader`].
    /// Expression-form fields are written in their evaluated numeric form.
    pub fn to_document(&self) -> Value {
        let mut doc = JsonMap::new();
        doc.insert("model_type".into(), json_str(self.model.model_type.as_str()));
        doc.insert("backbone".into(), backbone_document(&self.model.backbone));
        doc.insert("neck".into(), neck_document(&self.model.neck));
        doc.insert("head".into(), head_document(&self.model.head));
        doc.insert("loss".into(), loss_document(&self.model.loss));
        doc.insert("optimizer".into(), optimizer_document(&self.optimizer));
        doc.insert(
            "lr_config".into(),
            serde_json::json!({
                "warmup_iters": self.lr_config.warmup_iters,
                "warmup_ratio": self.lr_config.warmup_ratio,
                "step": self.lr_config.step,
            }),
        );
        doc.insert(
            "data".into(),
            serde_json::json!({
                "data_root": self.data.data_root,
                "imgs_per_gpu": self.data.imgs_per_gpu,
                "train": split_document(&self.data.train),
                "val": split_document(&self.data.val),
                "test": split_document(&self.data.test),
            }),
        );
        doc.insert("work_dir".into(), json_str(&self.run.work_dir));
        doc.insert("checkpoint".into(), json_str(&self.run.checkpoint));
        doc.insert("total_epochs".into(), self.run.total_epochs.into());
        doc.insert("num_gpus".into(), self.run.num_gpus.into());
        doc.insert("resume".into(), self.run.resume.into());
        doc.insert("log_level".into(), json_str(self.run.log_level.as_str()));
        Value::Object(doc)
    }
}

fn json_str<S: AsRef<str>>(s: S) -> Value {
    Value::String(s.as_ref().to_string())
}

fn backbone_document(backbone: &BackboneConfig) -> Value {
    serde_json::json!({
        "pretrained": backbone.pretrained,
        "depth": backbone.depth,
        "num_stages": backbone.num_stages,
        "out_indices": backbone.out_indices,
        "frozen_stages": backbone.frozen_stages,
        "norm_cfg": {
            "type": backbone.norm_cfg.type_tag,
            "requires_grad": backbone.norm_cfg.requires_grad,
        },
        "style": backbone.style.as_str(),
    })
}

fn neck_document(neck: &NeckConfig) -> Value {
    serde_json::json!({
        "in_channels": neck.in_channels,
        "out_channels": neck.out_channels,
        "start_level": neck.start_level,
        "add_extra_convs": neck.add_extra_convs,
        "extra_convs_on_inputs": neck.extra_convs_on_inputs,
        "num_outs": neck.num_outs,
        "relu_before_extra_convs": neck.relu_before_extra_convs,
    })
}

fn head_document(head: &HeadConfig) -> Value {
    serde_json::json!({
        "num_classes": head.num_classes,
        "in_channels": head.in_channels,
        "max_energy": head.max_energy,
        "stacked_convs": head.stacked_convs,
        "feat_channels": head.feat_channels,
        "strides": head.strides,
        "split_convs": head.split_convs,
    })
}

fn loss_document(loss: &LossConfig) -> Value {
    serde_json::json!({
        "classifier": {
            "use_sigmoid": loss.classifier.use_sigmoid,
            "gamma": loss.classifier.gamma,
            "alpha": loss.classifier.alpha,
            "loss_weight": loss.classifier.loss_weight,
        },
        "bbox": { "loss_weight": loss.bbox.loss_weight },
        "energy": {
            "use_sigmoid": loss.energy.use_sigmoid,
            "loss_weight": loss.energy.loss_weight,
        },
    })
}

fn optimizer_document(optimizer: &OptimizerConfig) -> Value {
    let mut map = JsonMap::new();
    map.insert("type".into(), json_str(optimizer.kind.as_str()));
    map.insert("lr".into(), serde_json::json!(optimizer.lr));
    map.insert("weight_decay".into(), serde_json::json!(optimizer.weight_decay));
    if let Some(momentum) = optimizer.momentum {
        map.insert("momentum".into(), serde_json::json!(momentum));
    }
    if let Some(eps) = optimizer.eps {
        map.insert("eps".into(), serde_json::json!(eps));
    }
    if let Some(paramwise) = &optimizer.paramwise_options {
        map.insert(
            "paramwise_options".into(),
            serde_json::json!({
                "bias_lr_mult": paramwise.bias_lr_mult,
                "bias_decay_mult": paramwise.bias_decay_mult,
            }),
        );
    }
    Value::Object(map)
}

fn split_document(split: &SplitConfig) -> Value {
    serde_json::json!({
        "ann_file": split.ann_file,
        "img_prefix": split.img_prefix,
    })
}

// --- tree access helpers ------------------------------------------------

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a JsonMap> {
    value
        .as_object()
        .ok_or_else(|| ConfigError::type_mismatch(path, "an object", describe(value)))
}

fn require<'a>(map: &'a JsonMap, prefix: &str, key: &str) -> Result<&'a Value> {
    map.get(key)
        .ok_or_else(|| ConfigError::missing_field(join(prefix, key)))
}

fn check_keys(map: &JsonMap, prefix: &str, allowed: &[&str]) -> Result<()> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(ConfigError::unknown_field(join(prefix, key)));
        }
    }
    Ok(())
}

fn string_value(value: &Value, path: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::type_mismatch(path, "a string", describe(value)))
}

fn bool_value(value: &Value, path: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::type_mismatch(path, "a boolean", describe(value)))
}

fn f64_value(value: &Value, path: &str) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ConfigError::type_mismatch(path, "a number", describe(value)))
}

fn nonneg_f64(value: &Value, path: &str) -> Result<f64> {
    let number = f64_value(value, path)?;
    if number >= 0.0 {
        Ok(number)
    } else {
        Err(ConfigError::type_mismatch(path, "a non-negative number", number.to_string()))
    }
}

fn positive_f64(value: &Value, path: &str) -> Result<f64> {
    let number = f64_value(value, path)?;
    if number > 0.0 {
        Ok(number)
    } else {
        Err(ConfigError::type_mismatch(path, "a positive number", number.to_string()))
    }
}

fn u32_value(value: &Value, path: &str) -> Result<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ConfigError::type_mismatch(path, "a non-negative integer", describe(value)))
}

fn positive_u32(value: &Value, path: &str) -> Result<u32> {
    match u32_value(value, path)? {
        0 => Err(ConfigError::type_mismatch(path, "a positive integer", "0")),
        n => Ok(n),
    }
}

fn i32_value(value: &Value, path: &str) -> Result<i32> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| ConfigError::type_mismatch(path, "an integer", describe(value)))
}

fn u32_sequence(value: &Value, path: &str) -> Result<Vec<u32>> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfigError::type_mismatch(path, "an array of integers", describe(value)))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| u32_value(item, &format!("{path}[{i}]")))
        .collect()
}

fn positive_u32_sequence(value: &Value, path: &str) -> Result<Vec<u32>> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfigError::type_mismatch(path, "an array of integers", describe(value)))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| positive_u32(item, &format!("{path}[{i}]")))
        .collect()
}

fn enum_value<T>(
    value: &Value,
    path: &str,
    expected: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T> {
    let tag = value
        .as_str()
        .ok_or_else(|| ConfigError::type_mismatch(path, expected, describe(value)))?;
    parse(tag).ok_or_else(|| ConfigError::type_mismatch(path, expected, format!("\"{tag}\"")))
}

// --- section builders ---------------------------------------------------

fn backbone_section(value: &Value) -> Result<BackboneConfig> {
    let map = object(value, "backbone")?;
    check_keys(
        map,
        "backbone",
        &["pretrained", "depth", "num_stages", "out_indices", "frozen_stages", "norm_cfg", "style"],
    )?;

    let depth = u32_value(require(map, "backbone", "depth")?, "backbone.depth")?;
    if !matches!(depth, 18 | 34 | 50 | 101 | 152) {
        return Err(ConfigError::type_mismatch(
            "backbone.depth",
            "one of 18, 34, 50, 101, 152",
            depth.to_string(),
        ));
    }

    let num_stages = positive_u32(require(map, "backbone", "num_stages")?, "backbone.num_stages")?;

    let out_indices = u32_sequence(require(map, "backbone", "out_indices")?, "backbone.out_indices")?;
    for (i, &index) in out_indices.iter().enumerate() {
        if index >= num_stages {
            return Err(ConfigError::type_mismatch(
                format!("backbone.out_indices[{i}]"),
                format!("a stage index below num_stages ({num_stages})"),
                index.to_string(),
            ));
        }
    }

    let frozen_stages =
        i32_value(require(map, "backbone", "frozen_stages")?, "backbone.frozen_stages")?;
    if frozen_stages < -1 || frozen_stages > num_stages as i32 {
        return Err(ConfigError::type_mismatch(
            "backbone.frozen_stages",
            format!("an integer in [-1, {num_stages}]"),
            frozen_stages.to_string(),
        ));
    }

    let norm_map = object(require(map, "backbone", "norm_cfg")?, "backbone.norm_cfg")?;
    check_keys(norm_map, "backbone.norm_cfg", &["type", "requires_grad"])?;
    let norm_cfg = NormConfig {
        type_tag: string_value(
            require(norm_map, "backbone.norm_cfg", "type")?,
            "backbone.norm_cfg.type",
        )?,
        requires_grad: bool_value(
            require(norm_map, "backbone.norm_cfg", "requires_grad")?,
            "backbone.norm_cfg.requires_grad",
        )?,
    };

    Ok(BackboneConfig {
        pretrained: string_value(require(map, "backbone", "pretrained")?, "backbone.pretrained")?,
        depth,
        num_stages,
        out_indices,
        frozen_stages,
        norm_cfg,
        style: enum_value(
            require(map, "backbone", "style")?,
            "backbone.style",
            r#"one of "caffe", "pytorch""#,
            BackboneStyle::parse,
        )?,
    })
}

fn neck_section(value: &Value) -> Result<NeckConfig> {
    let map = object(value, "neck")?;
    check_keys(
        map,
        "neck",
        &[
            "in_channels",
            "out_channels",
            "start_level",
            "add_extra_convs",
            "extra_convs_on_inputs",
            "num_outs",
            "relu_before_extra_convs",
        ],
    )?;

    let in_channels =
        positive_u32_sequence(require(map, "neck", "in_channels")?, "neck.in_channels")?;

    let start_level = u32_value(require(map, "neck", "start_level")?, "neck.start_level")?;
    if start_level as usize >= in_channels.len() {
        return Err(ConfigError::type_mismatch(
            "neck.start_level",
            format!("a level index below the in_channels length ({})", in_channels.len()),
            start_level.to_string(),
        ));
    }

    let add_extra_convs =
        bool_value(require(map, "neck", "add_extra_convs")?, "neck.add_extra_convs")?;
    let num_outs = positive_u32(require(map, "neck", "num_outs")?, "neck.num_outs")?;
    if add_extra_convs && (num_outs as usize) < in_channels.len() {
        return Err(ConfigError::type_mismatch(
            "neck.num_outs",
            format!(
                "at least {} outputs when add_extra_convs is enabled",
                in_channels.len()
            ),
            num_outs.to_string(),
        ));
    }

    Ok(NeckConfig {
        in_channels,
        out_channels: positive_u32(require(map, "neck", "out_channels")?, "neck.out_channels")?,
        start_level,
        add_extra_convs,
        extra_convs_on_inputs: bool_value(
            require(map, "neck", "extra_convs_on_inputs")?,
            "neck.extra_convs_on_inputs",
        )?,
        num_outs,
        relu_before_extra_convs: bool_value(
            require(map, "neck", "relu_before_extra_convs")?,
            "neck.relu_before_extra_convs",
        )?,
    })
}

fn head_section(value: &Value) -> Result<HeadConfig> {
    let map = object(value, "head")?;
    check_keys(
        map,
        "head",
        &[
            "num_classes",
            "in_channels",
            "max_energy",
            "stacked_convs",
            "feat_channels",
            "strides",
            "split_convs",
        ],
    )?;

    let strides = positive_u32_sequence(require(map, "head", "strides")?, "head.strides")?;
    if strides.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ConfigError::type_mismatch(
            "head.strides",
            "a strictly increasing sequence of positive integers",
            format!("{strides:?}"),
        ));
    }

    Ok(HeadConfig {
        num_classes: positive_u32(require(map, "head", "num_classes")?, "head.num_classes")?,
        in_channels: positive_u32(require(map, "head", "in_channels")?, "head.in_channels")?,
        max_energy: positive_u32(require(map, "head", "max_energy")?, "head.max_energy")?,
        stacked_convs: u32_value(require(map, "head", "stacked_convs")?, "head.stacked_convs")?,
        feat_channels: positive_u32(require(map, "head", "feat_channels")?, "head.feat_channels")?,
        strides,
        split_convs: bool_value(require(map, "head", "split_convs")?, "head.split_convs")?,
    })
}

fn loss_section(value: &Value) -> Result<LossConfig> {
    let map = object(value, "loss")?;
    check_keys(map, "loss", &["classifier", "bbox", "energy"])?;

    let classifier_map = object(require(map, "loss", "classifier")?, "loss.classifier")?;
    check_keys(
        classifier_map,
        "loss.classifier",
        &["use_sigmoid", "gamma", "alpha", "loss_weight"],
    )?;
    let classifier = ClassifierLossConfig {
        use_sigmoid: bool_value(
            require(classifier_map, "loss.classifier", "use_sigmoid")?,
            "loss.classifier.use_sigmoid",
        )?,
        gamma: f64_value(
            require(classifier_map, "loss.classifier", "gamma")?,
            "loss.classifier.gamma",
        )?,
        alpha: f64_value(
            require(classifier_map, "loss.classifier", "alpha")?,
            "loss.classifier.alpha",
        )?,
        loss_weight: f64_value(
            require(classifier_map, "loss.classifier", "loss_weight")?,
            "loss.classifier.loss_weight",
        )?,
    };

    let bbox_map = object(require(map, "loss", "bbox")?, "loss.bbox")?;
    check_keys(bbox_map, "loss.bbox", &["loss_weight"])?;
    let bbox = BboxLossConfig {
        loss_weight: f64_value(
            require(bbox_map, "loss.bbox", "loss_weight")?,
            "loss.bbox.loss_weight",
        )?,
    };

    let energy_map = object(require(map, "loss", "energy")?, "loss.energy")?;
    check_keys(energy_map, "loss.energy", &["use_sigmoid", "loss_weight"])?;
    let energy = EnergyLossConfig {
        use_sigmoid: bool_value(
            require(energy_map, "loss.energy", "use_sigmoid")?,
            "loss.energy.use_sigmoid",
        )?,
        loss_weight: f64_value(
            require(energy_map, "loss.energy", "loss_weight")?,
            "loss.energy.loss_weight",
        )?,
    };

    Ok(LossConfig { classifier, bbox, energy })
}

fn optimizer_section(value: &Value) -> Result<OptimizerConfig> {
    let map = object(value, "optimizer")?;

    let kind = enum_value(
        require(map, "optimizer", "type")?,
        "optimizer.type",
        r#"one of "SGD", "Adam""#,
        OptimizerKind::parse,
    )?;

    // The accepted key set depends on the algorithm: momentum belongs to
    // SGD, eps to Adam.
    let allowed: &[&str] = match kind {
        OptimizerKind::Sgd => &["type", "lr", "weight_decay", "momentum", "paramwise_options"],
        OptimizerKind::Adam => &["type", "lr", "weight_decay", "eps", "paramwise_options"],
    };
    check_keys(map, "optimizer", allowed)?;

    let momentum = match kind {
        OptimizerKind::Sgd => {
            let momentum =
                f64_value(require(map, "optimizer", "momentum")?, "optimizer.momentum")?;
            if !(0.0..1.0).contains(&momentum) {
                return Err(ConfigError::type_mismatch(
                    "optimizer.momentum",
                    "a real in [0, 1)",
                    momentum.to_string(),
                ));
            }
            Some(momentum)
        }
        OptimizerKind::Adam => None,
    };

    let eps = match kind {
        OptimizerKind::Adam => map
            .get("eps")
            .map(|value| positive_f64(value, "optimizer.eps"))
            .transpose()?,
        OptimizerKind::Sgd => None,
    };

    let paramwise_options = map
        .get("paramwise_options")
        .map(|value| {
            let paramwise_map = object(value, "optimizer.paramwise_options")?;
            check_keys(
                paramwise_map,
                "optimizer.paramwise_options",
                &["bias_lr_mult", "bias_decay_mult"],
            )?;
            Ok(ParamwiseOptions {
                bias_lr_mult: nonneg_f64(
                    require(paramwise_map, "optimizer.paramwise_options", "bias_lr_mult")?,
                    "optimizer.paramwise_options.bias_lr_mult",
                )?,
                bias_decay_mult: nonneg_f64(
                    require(paramwise_map, "optimizer.paramwise_options", "bias_decay_mult")?,
                    "optimizer.paramwise_options.bias_decay_mult",
                )?,
            })
        })
        .transpose()?;

    Ok(OptimizerConfig {
        kind,
        lr: f64_value(require(map, "optimizer", "lr")?, "optimizer.lr")?,
        weight_decay: nonneg_f64(
            require(map, "optimizer", "weight_decay")?,
            "optimizer.weight_decay",
        )?,
        momentum,
        eps,
        paramwise_options,
    })
}

fn lr_section(value: &Value) -> Result<LrScheduleConfig> {
    let map = object(value, "lr_config")?;
    check_keys(map, "lr_config", &["warmup_iters", "warmup_ratio", "step"])?;

    let raw_ratio = require(map, "lr_config", "warmup_ratio")?;
    let warmup_ratio = match raw_ratio {
        Value::Number(_) => f64_value(raw_ratio, "lr_config.warmup_ratio")?,
        Value::String(text) => expr::eval(text)
            .map_err(|e| ConfigError::expression("lr_config.warmup_ratio", e.to_string()))?,
        other => {
            return Err(ConfigError::type_mismatch(
                "lr_config.warmup_ratio",
                "a number or an arithmetic expression string",
                describe(other),
            ))
        }
    };

    Ok(LrScheduleConfig {
        warmup_iters: u32_value(
            require(map, "lr_config", "warmup_iters")?,
            "lr_config.warmup_iters",
        )?,
        warmup_ratio,
        step: positive_u32_sequence(require(map, "lr_config", "step")?, "lr_config.step")?,
    })
}

fn data_section(value: &Value) -> Result<DataConfig> {
    let map = object(value, "data")?;
    check_keys(map, "data", &["data_root", "imgs_per_gpu", "train", "val", "test"])?;

    Ok(DataConfig {
        data_root: string_value(require(map, "data", "data_root")?, "data.data_root")?,
        imgs_per_gpu: positive_u32(require(map, "data", "imgs_per_gpu")?, "data.imgs_per_gpu")?,
        train: split_section(require(map, "data", "train")?, "data.train")?,
        val: split_section(require(map, "data", "val")?, "data.val")?,
        test: split_section(require(map, "data", "test")?, "data.test")?,
    })
}

fn split_section(value: &Value, prefix: &str) -> Result<SplitConfig> {
    let map = object(value, prefix)?;
    check_keys(map, prefix, &["ann_file", "img_prefix"])?;

    Ok(SplitConfig {
        ann_file: string_value(require(map, prefix, "ann_file")?, &join(prefix, "ann_file"))?,
        img_prefix: string_value(require(map, prefix, "img_prefix")?, &join(prefix, "img_prefix"))?,
    })
}

fn run_section(root: &JsonMap) -> Result<RunConfig> {
    Ok(RunConfig {
        work_dir: string_value(require(root, "", "work_dir")?, "work_dir")?,
        checkpoint: string_value(require(root, "", "checkpoint")?, "checkpoint")?,
        total_epochs: positive_u32(require(root, "", "total_epochs")?, "total_epochs")?,
        num_gpus: positive_u32(require(root, "", "num_gpus")?, "num_gpus")?,
        resume: bool_value(require(root, "", "resume")?, "resume")?,
        log_level: enum_value(
            require(root, "", "log_level")?,
            "log_level",
            r#"one of "DEBUG", "INFO", "WARNING", "ERROR""#,
            LogLevelKind::parse,
        )?,
    })
}
