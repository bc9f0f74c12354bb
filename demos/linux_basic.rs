use icm20602_rs::{self, register, AccelFullScale, GyroFullScale, SensorConfig};
use linux_embedded_hal::I2cdev;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::Duration;

fn main() {
    println!("ICM20602 - Ejemplo básico");

    // Flag para controlar la ejecución del programa
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Configurar el manejador para Ctrl+C
    ctrlc::set_handler(move || {
        println!("\nDeteniendo el programa...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error al configurar el manejador de Ctrl+C");

    let bus = std::env::args().nth(1).unwrap_or_else(|| "/dev/i2c-1".to_string());
    let i2c = match I2cdev::new(&bus) {
        Ok(i2c) => i2c,
        Err(e) => {
            eprintln!("Error al abrir dispositivo I2C {}: {:?}", bus, e);
            return;
        }
    };

    let mut device = icm20602_rs::new_i2c_device(i2c, register::I2C_ADDRESS);

    if let Err(e) = device.verify_device() {
        eprintln!("Dispositivo no reconocido: {}", e);
        return;
    }

    // El reset deja el sensor dormido y con la temperatura desactivada;
    // `configure` despierta al sensor y reactiva la temperatura.
    if let Err(e) = device.reset() {
        eprintln!("Error en el reset: {}", e);
        return;
    }
    thread::sleep(Duration::from_millis(100));

    let config = SensorConfig {
        accel_range: AccelFullScale::Fs4G,
        gyro_range: GyroFullScale::Fs500Dps,
        sample_rate_hz: 50,
        ..SensorConfig::default()
    };
    if let Err(e) = device.configure(&config) {
        eprintln!("Error al configurar el sensor: {}", e);
        return;
    }
    println!("Dispositivo configurado: {:?}", device.state());

    while running.load(Ordering::SeqCst) {
        match device.read_accel_and_gyro() {
            Ok(reading) => {
                if let (Some(a), Some(g)) = (reading.accel, reading.gyro) {
                    println!(
                        "Accel [mg]: {:6} {:6} {:6} | Gyro [0.1 dps]: {:6} {:6} {:6} | Temp: {} °C",
                        a.x, a.y, a.z, g.x, g.y, g.z, reading.temperature_c
                    );
                }
            }
            Err(e) => eprintln!("Error de lectura: {}", e),
        }
        thread::sleep(Duration::from_millis(100));
    }

    // Dejar el sensor dormido al salir
    if let Err(e) = device.set_sleep(true) {
        eprintln!("Error al dormir el sensor: {}", e);
    }
}
