use anyhow::Result;
use clap::{Parser, Subcommand};
use rvdmi::{
    diag::{self, DiagSession, MemRegion},
    jtag::JtagDtm,
    regs,
    sim::{SimConfig, SimTarget},
    DmiConfig,
};

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Number of harts of the simulated target
    #[arg(long, global = true, default_value = "1")]
    harts: u32,

    /// Implemented hart select bits of the simulated target
    #[arg(long, global = true, default_value = "5")]
    hartsel_bits: u32,

    /// The target has an FPU
    #[arg(long, global = true, default_value = "false")]
    fpu: bool,

    /// The target lacks the CORE-V hardware loop extension
    #[arg(long, global = true, default_value = "false")]
    no_hwlp: bool,

    /// RETRY responses the target gives before each DMI result
    #[arg(long, global = true, default_value = "0")]
    busy_scans: usize,

    /// Polls an abstract command stays busy
    #[arg(long, global = true, default_value = "0")]
    busy_polls: usize,

    /// RETRY responses tolerated on one DMI access
    #[arg(long, global = true, default_value = "100")]
    retry_limit: usize,

    /// Busy polls tolerated on abstract commands and system bus accesses
    #[arg(long, global = true, default_value = "100")]
    poll_limit: usize,

    /// Leave cmderr set after a failed abstract command
    #[arg(long, global = true, default_value = "false")]
    keep_cmderr: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump Debug Module status registers
    Status {},
    /// Discover harts and dump their status
    Harts {},
    /// Dump, write and read back the GPRs of a hart
    Gprs {
        #[arg(default_value = "0")]
        hart: u32,
    },
    /// Dump, write and read back the FPRs of a hart
    Fprs {
        #[arg(default_value = "0")]
        hart: u32,
    },
    /// Read all known CSRs of a hart
    Csrs {
        #[arg(default_value = "0")]
        hart: u32,
    },
    /// Write, read back and compare a memory region
    Mem {
        /// Start address, memory banks 0 and 1 when omitted
        #[arg(long, value_parser = parse_number, requires = "size")]
        base: Option<u32>,
        /// Length in bytes
        #[arg(long, value_parser = parse_number)]
        size: Option<u32>,
        /// Largest block written at once
        #[arg(long, default_value = "64")]
        max_block: usize,
        /// Seed of the test pattern
        #[arg(long, default_value = "1")]
        seed: u32,
    },
    /// Dump memory region
    Dump {
        /// Start address
        #[arg(value_parser = parse_number)]
        address: u32,
        /// Length in bytes
        #[arg(value_parser = parse_number)]
        length: u32,
    },
    /// Run every test on every hart
    All {
        /// Largest block written at once
        #[arg(long, default_value = "64")]
        max_block: usize,
        /// Seed of the test pattern
        #[arg(long, default_value = "1")]
        seed: u32,
    },
}

fn main() -> Result<()> {
    use Commands::*;

    let cli = Cli::parse();

    // init simplelogger
    let _ = simplelog::TermLogger::init(
        cli.verbose.log_level_filter(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let Some(command) = cli.command else {
        println!("No command given, use --help for help.");
        println!("hint: use `rvdmi status` to get started.");
        return Ok(());
    };

    let sim = SimTarget::new(SimConfig {
        harts: cli.harts,
        hartsel_bits: cli.hartsel_bits,
        fpu: cli.fpu,
        hwlp: !cli.no_hwlp,
        busy_scans: cli.busy_scans,
        busy_polls: cli.busy_polls,
        ..Default::default()
    });
    let mut config = DmiConfig::default()
        .with_retry_limit(cli.retry_limit)
        .with_busy_poll_limit(cli.poll_limit)
        .with_sb_poll_limit(cli.poll_limit);
    config.auto_clear_cmderr = !cli.keep_cmderr;

    let dtm = JtagDtm::new(sim).with_retry_limit(config.dmi_retry_limit);
    let mut session = DiagSession::attach(dtm, config)?;
    let (fpu, hwlp) = (cli.fpu, !cli.no_hwlp);

    match command {
        Status {} => {
            if let Some(idcode) = session.dmi.transport().idcode() {
                log::info!("{idcode:#x?}");
            }
            session.dmi.select_hart(0)?;
            let dmstatus = session.dmi.read::<regs::Dmstatus>()?;
            log::info!("{dmstatus:#x?}");
            log::info!("debug spec version: {}", dmstatus.version_name());
            let dmcontrol = session.dmi.read::<regs::Dmcontrol>()?;
            log::info!("{dmcontrol:#x?}");
            let hartinfo = session.dmi.read::<regs::Hartinfo>()?;
            log::info!("{hartinfo:#x?}");
            let abstractcs = session.dmi.read::<regs::Abstractcs>()?;
            log::info!("{abstractcs:#x?}");
            let sbcs = session.dmi.read::<regs::Sbcs>()?;
            log::info!("{sbcs:#x?}");
            let haltsum0 = session.dmi.read_nth::<regs::Haltsum>(0)?;
            log::info!("haltsum0: {haltsum0:#x?}");
        }
        Harts {} => {
            for hart in 0..session.num_harts {
                session.hart_status(hart)?;
            }
        }
        Gprs { hart } => {
            session.halt_hart(hart)?;
            let mismatches = session.test_gprs()?;
            if !mismatches.is_empty() {
                anyhow::bail!("{} GPR accesses failed", mismatches.len());
            }
        }
        Fprs { hart } => {
            session.halt_hart(hart)?;
            let mismatches = session.test_fprs()?;
            if !mismatches.is_empty() {
                anyhow::bail!("{} FPR accesses failed", mismatches.len());
            }
        }
        Csrs { hart } => {
            session.halt_hart(hart)?;
            session.test_csrs(fpu, hwlp)?;
        }
        Mem {
            base,
            size,
            max_block,
            seed,
        } => {
            let regions = match (base, size) {
                (Some(base), Some(size)) => vec![MemRegion::new("memory", base, size)],
                _ => vec![diag::MEMORY_BANK_0, diag::MEMORY_BANK_1],
            };
            let mut failed = 0;
            for region in &regions {
                failed += session.test_mem(region, max_block, seed)?;
            }
            if failed != 0 {
                anyhow::bail!("{failed} bytes did not read back");
            }
        }
        Dump { address, length } => {
            log::info!(
                "Read memory from 0x{:08x} to 0x{:08x}",
                address,
                address as u64 + length as u64
            );
            let out = session.dmi.read_mem(address, length as usize)?;
            println!(
                "{}",
                nu_pretty_hex::config_hex(
                    &out,
                    nu_pretty_hex::HexConfig {
                        title: true,
                        ascii: true,
                        address_offset: address as _,
                        ..Default::default()
                    },
                )
            );
        }
        All { max_block, seed } => {
            let mut failed = 0;
            for hart in 0..session.num_harts {
                log::info!("Testing hart {hart}");
                if !session.halt_hart(hart)? {
                    failed += 1;
                    continue;
                }
                session.hart_status(hart)?;
                session.report_pc()?;
                failed += session.test_gprs()?.len();
                if fpu {
                    failed += session.test_fprs()?.len();
                }
                session.test_csrs(fpu, hwlp)?;
                for region in [diag::MEMORY_BANK_0, diag::MEMORY_BANK_1] {
                    failed += session.test_mem(&region, max_block, seed)?;
                }
            }
            if failed != 0 {
                anyhow::bail!("{failed} checks failed");
            }
            log::info!("All tests passed");
        }
    }

    Ok(())
}

pub fn parse_number(s: &str) -> std::result::Result<u32, String> {
    let s = s.replace('_', "").to_lowercase();
    if let Some(hex_str) = s.strip_prefix("0x") {
        u32::from_str_radix(hex_str, 16).map_err(|e| format!("error while parsing {s:?}: {e}"))
    } else if let Some(bin_str) = s.strip_prefix("0b") {
        u32::from_str_radix(bin_str, 2).map_err(|e| format!("error while parsing {s:?}: {e}"))
    } else {
        s.parse()
            .map_err(|e| format!("error while parsing {s:?}: {e}"))
    }
}
