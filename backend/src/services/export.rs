//! CSV export of a load: summary block, length distribution and package list

use rust_decimal::{Decimal, RoundingStrategy};
use shared::constants::{CROSS_SECTION_HEIGHT_MM, CROSS_SECTION_WIDTH_MM};
use shared::{board_feet_to_cubic_meters, DistributionEntry, LengthDistribution, Load, Package};

use super::load::{LoadDetail, LoadService};
use crate::error::{AppError, AppResult};

/// Export service; renders what the load detail already computed
#[derive(Clone)]
pub struct ExportService {
    loads: LoadService,
}

/// A rendered export ready to be sent as a download
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

impl ExportService {
    pub fn new(loads: LoadService) -> Self {
        Self { loads }
    }

    /// Export a load as CSV
    pub async fn export_load(&self, name: &str) -> AppResult<ExportFile> {
        let detail = self.loads.get_load_detail(name).await?;
        let content = render_load_csv(&detail)?;

        tracing::info!(load = %name, packages = detail.packages.len(), "Load exported");
        Ok(ExportFile {
            file_name: export_file_name(&detail.load),
            content,
        })
    }
}

/// `Carga_<name>.csv` with anything but alphanumerics replaced by `_`
pub fn export_file_name(load: &Load) -> String {
    let safe: String = load
        .name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("Carga_{}.csv", safe)
}

/// Render the full CSV document for a load
pub fn render_load_csv(detail: &LoadDetail) -> AppResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);

    let total = detail.balance.total_board_feet;
    write_summary(&mut wtr, detail, total)?;
    write_distribution(&mut wtr, &detail.distribution, total)?;
    write_package_list(&mut wtr, &detail.packages)?;

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
}

type CsvWriter = csv::Writer<Vec<u8>>;

fn write_row<I, T>(wtr: &mut CsvWriter, record: I) -> AppResult<()>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    wtr.write_record(record)
        .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))
}

fn write_summary(wtr: &mut CsvWriter, detail: &LoadDetail, total: Decimal) -> AppResult<()> {
    let load = &detail.load;
    write_row(wtr, ["Carga", load.name.as_str()])?;
    write_row(wtr, ["Número", load.number.as_str()])?;
    write_row(wtr, ["Estado".to_string(), load.status.to_string()])?;
    write_row(wtr, ["Total PT".to_string(), total.to_string()])?;
    write_row(wtr, ["M³".to_string(), cubic_meters(total).to_string()])?;
    write_row(wtr, ["Paquetes".to_string(), detail.packages.len().to_string()])?;
    write_row(wtr, [""])
}

fn write_distribution(
    wtr: &mut CsvWriter,
    distribution: &LengthDistribution,
    total: Decimal,
) -> AppResult<()> {
    write_row(wtr, ["Medida", "Piezas", "PT", "%"])?;

    for entry in distribution.display_rows() {
        match entry {
            DistributionEntry::Length(row) if row.board_feet > Decimal::ZERO => {
                write_row(
                    wtr,
                    [
                        length_label(row.length),
                        row.piece_count.to_string(),
                        row.board_feet.to_string(),
                        format!("{:.2}", row.pct),
                    ],
                )?;
            }
            DistributionEntry::Length(_) => {}
            DistributionEntry::Subtotal(subtotal) => {
                write_row(
                    wtr,
                    [
                        subtotal.label.clone(),
                        subtotal.piece_count.to_string(),
                        subtotal.board_feet.to_string(),
                        format!("{:.2}", subtotal.pct),
                    ],
                )?;
            }
        }
    }

    let total_pct = if total > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    write_row(
        wtr,
        [
            "TOTAL".to_string(),
            distribution.total_piece_count().to_string(),
            total.to_string(),
            total_pct.to_string(),
        ],
    )?;
    write_row(wtr, [""])
}

fn write_package_list(wtr: &mut CsvWriter, packages: &[Package]) -> AppResult<()> {
    write_row(
        wtr,
        ["Paquete", "Largo", "Especie", "Acabado", "Cert.", "Piezas", "PT", "M³"],
    )?;

    let mut grand_pieces = 0i64;
    let mut grand_total = Decimal::ZERO;
    for package in packages {
        let mut lines: Vec<_> = package.content().iter().collect();
        lines.sort_by_key(|line| line.length());

        for (i, line) in lines.into_iter().enumerate() {
            // Package attributes only on the first line
            let first = i == 0;
            let attr = |value: &str| if first { value.to_string() } else { String::new() };
            write_row(
                wtr,
                [
                    attr(package.id.as_str()),
                    length_label(line.length()),
                    attr(package.species.as_str()),
                    attr(package.finish.as_str()),
                    attr(package.certification.as_str()),
                    line.piece_count().to_string(),
                    line.board_feet().to_string(),
                    cubic_meters(line.board_feet()).to_string(),
                ],
            )?;
        }
        write_total_row(
            wtr,
            format!("Total {}", package.id),
            package.piece_count(),
            package.total_board_feet(),
        )?;
        grand_pieces += package.piece_count();
        grand_total += package.total_board_feet();
    }

    write_total_row(wtr, "TOTAL GENERAL".to_string(), grand_pieces, grand_total)
}

fn write_total_row(
    wtr: &mut CsvWriter,
    label: String,
    pieces: i64,
    board_feet: Decimal,
) -> AppResult<()> {
    write_row(
        wtr,
        [
            label,
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            pieces.to_string(),
            board_feet.to_string(),
            cubic_meters(board_feet).to_string(),
        ],
    )
}

/// `21x145x 8'`
fn length_label(length: i32) -> String {
    format!(
        "{}x{}x {}'",
        CROSS_SECTION_WIDTH_MM, CROSS_SECTION_HEIGHT_MM, length
    )
}

fn cubic_meters(board_feet: Decimal) -> Decimal {
    round_half_up(board_feet_to_cubic_meters(board_feet), 3)
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
