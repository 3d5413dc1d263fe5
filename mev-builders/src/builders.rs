use crate::{Builder, Signing};

/// List of known builders with their details, ordered by block production.
pub static BUILDERS: &[Builder] = &[
    // Blocks: 21,384
    Builder {
        name: "Titan Builder",
        identifier: "titan",
        website: "https://titanbuilder.xyz",
        searcher_rpc: "https://rpc.titanbuilder.xyz",
        mev_share_rpc: Some("https://rpc.titanbuilder.xyz"),
        extra_data: Some("Titan (titanbuilder.xyz)"),
        signing: Signing::Optional,
        account_required: false,
    },
    // Blocks: 15,102
    Builder {
        name: "BuilderNet",
        identifier: "buildernet",
        website: "https://buildernet.org",
        searcher_rpc: "https://direct-us.buildernet.org:443",
        mev_share_rpc: None,
        extra_data: Some("BuilderNet (Flashbots)"),
        signing: Signing::Optional,
        account_required: false,
    },
    // Blocks: 12,007
    Builder {
        name: "Beaver Build",
        identifier: "beaverbuild",
        website: "https://beaverbuild.org",
        searcher_rpc: "https://rpc.beaverbuild.org",
        mev_share_rpc: Some("https://mevshare-rpc.beaverbuild.org"),
        extra_data: Some("beaverbuild.org"),
        signing: Signing::NotSupported,
        account_required: false,
    },
    // Blocks: 3,540
    Builder {
        name: "rsync Builder",
        identifier: "rsync",
        website: "https://rsync-builder.xyz",
        searcher_rpc: "https://rsync-builder.xyz",
        mev_share_rpc: Some("https://rsync-builder.xyz"),
        extra_data: Some("rsync-builder.xyz"),
        signing: Signing::NotSupported,
        account_required: false,
    },
    // Blocks: 2,311
    Builder {
        name: "Quasar Builder",
        identifier: "quasar",
        website: "https://quasar.win",
        searcher_rpc: "https://rpc.quasar.win",
        mev_share_rpc: Some("https://rpc.quasar.win"),
        extra_data: Some("Quasar (quasar.win)"),
        signing: Signing::NotSupported,
        account_required: false,
    },
    // Blocks: 1,128
    Builder {
        name: "BTCS Builder",
        identifier: "btcs",
        website: "https://btcs.com",
        searcher_rpc: "https://rpc.btcs.com",
        mev_share_rpc: Some("https://flashbots.btcs.com"),
        extra_data: Some("BTCS"),
        signing: Signing::Optional,
        account_required: false,
    },
    // Blocks: 642
    Builder {
        name: "bloXroute",
        identifier: "bloxroute",
        website: "https://bloxroute.com",
        searcher_rpc: "https://mev.api.blxrbdn.com",
        mev_share_rpc: Some("https://rpc-builder.blxrbdn.com"),
        extra_data: Some("Powered by bloXroute"),
        signing: Signing::NotSupported,
        account_required: true,
    },
    // Blocks: 87
    Builder {
        name: "Eureka Builder",
        identifier: "eureka",
        website: "https://eurekabuilder.xyz",
        searcher_rpc: "https://rpc.eurekabuilder.xyz",
        mev_share_rpc: Some("https://rpc.eurekabuilder.xyz"),
        extra_data: Some("Eureka (eurekabuilder.xyz)"),
        signing: Signing::NotSupported,
        account_required: false,
    },
    // Blocks: 12
    Builder {
        name: "Builder0x69",
        identifier: "builder0x69",
        website: "https://builder0x69.io",
        searcher_rpc: "https://builder0x69.io",
        mev_share_rpc: Some("https://builder0x69.io"),
        extra_data: Some("@builder0x69"),
        signing: Signing::NotSupported,
        account_required: false,
    },
];

/// Other builders without recent block production data.
pub static OTHER_BUILDERS: &[Builder] = &[
    // No recent block data
    Builder {
        name: "Flashbots",
        identifier: "flashbots",
        website: "https://flashbots.net",
        searcher_rpc: "https://relay.flashbots.net",
        mev_share_rpc: Some("https://rpc.flashbots.net"),
        extra_data: None,
        signing: Signing::Required,
        account_required: false,
    },
    // No recent block data
    Builder {
        name: "Gigabuilder",
        identifier: "gigabuilder",
        website: "https://gigabuilder.io",
        searcher_rpc: "https://rpc.gigabuilder.io",
        mev_share_rpc: None,
        extra_data: None,
        signing: Signing::NotSupported,
        account_required: false,
    },
];
